use bigjson_core::{parse, quote, stringify, JsonValue, Number, ParseOptions, Replacer, Space};

/// Helper: parse a document and return its plain value tree.
fn value_of(text: &str) -> JsonValue {
    parse(text, &ParseOptions::default())
        .expect("input must parse")
        .data
}

// ============================================================================
// Basic rendering
// ============================================================================

#[test]
fn compact_by_default() {
    assert_eq!(
        stringify(&value_of(r#"{"a":[1,2]}"#), None, None),
        r#"{"a":[1,2]}"#
    );
}

#[test]
fn two_space_indentation() {
    assert_eq!(
        stringify(&value_of(r#"{"a":[1,2]}"#), None, Some(Space::Count(2))),
        "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
    );
}

#[test]
fn empty_containers_render_compact_even_when_indented() {
    assert_eq!(
        stringify(&value_of(r#"{"a":{},"b":[]}"#), None, Some(Space::Count(2))),
        "{\n  \"a\": {},\n  \"b\": []\n}"
    );
}

#[test]
fn scalar_documents() {
    assert_eq!(stringify(&JsonValue::Null, None, None), "null");
    assert_eq!(stringify(&JsonValue::Bool(true), None, None), "true");
    assert_eq!(
        stringify(&JsonValue::String("hi".to_string()), None, None),
        "\"hi\""
    );
}

#[test]
fn string_values_are_escaped() {
    assert_eq!(
        stringify(&JsonValue::String("a\nb".to_string()), None, None),
        r#""a\nb""#
    );
}

// ============================================================================
// Space handling
// ============================================================================

#[test]
fn literal_space_unit() {
    assert_eq!(
        stringify(
            &value_of("[1]"),
            None,
            Some(Space::Text("\t".to_string()))
        ),
        "[\n\t1\n]"
    );
}

#[test]
fn numeric_space_caps_at_ten() {
    assert_eq!(
        stringify(&value_of("[1]"), None, Some(Space::Count(20))),
        format!("[\n{}1\n]", " ".repeat(10))
    );
}

#[test]
fn literal_space_truncates_to_ten_characters() {
    assert_eq!(
        stringify(
            &value_of("[1]"),
            None,
            Some(Space::Text("abcdefghijKLMNOP".to_string()))
        ),
        "[\nabcdefghij1\n]"
    );
}

#[test]
fn zero_space_means_compact() {
    assert_eq!(
        stringify(&value_of("[1,2]"), None, Some(Space::Count(0))),
        "[1,2]"
    );
}

// ============================================================================
// Number formatting
// ============================================================================

#[test]
fn non_finite_floats_render_as_null() {
    assert_eq!(
        stringify(&JsonValue::Number(Number::Float(f64::NAN)), None, None),
        "null"
    );
    assert_eq!(
        stringify(
            &JsonValue::Number(Number::Float(f64::INFINITY)),
            None,
            None
        ),
        "null"
    );
}

#[test]
fn negative_zero_normalizes() {
    assert_eq!(
        stringify(&JsonValue::Number(Number::Float(-0.0)), None, None),
        "0"
    );
}

#[test]
fn integral_floats_print_without_fraction() {
    assert_eq!(
        stringify(&JsonValue::Number(Number::Float(2.0)), None, None),
        "2"
    );
    assert_eq!(
        stringify(&JsonValue::Number(Number::Float(1.5)), None, None),
        "1.5"
    );
}

#[test]
fn big_integers_render_exactly() {
    assert_eq!(
        stringify(&value_of("9007199254740993"), None, None),
        "9007199254740993"
    );
    assert_eq!(
        stringify(&value_of("123456789123456789123456789"), None, None),
        "123456789123456789123456789"
    );
}

// ============================================================================
// Replacer: function form
// ============================================================================

#[test]
fn replacer_function_transforms_members() {
    let value = value_of("[1,2,3]");
    let mut double = |_key: &str, value: &JsonValue| -> Option<JsonValue> {
        match value {
            JsonValue::Number(Number::Int(n)) => Some(JsonValue::Number(Number::Int(n * 2))),
            other => Some(other.clone()),
        }
    };
    assert_eq!(
        stringify(&value, Some(Replacer::Function(&mut double)), None),
        "[2,4,6]"
    );
}

#[test]
fn replacer_dropping_an_object_member_omits_it() {
    let value = value_of(r#"{"a":1,"secret":2,"b":3}"#);
    let mut censor = |key: &str, value: &JsonValue| -> Option<JsonValue> {
        if key == "secret" {
            None
        } else {
            Some(value.clone())
        }
    };
    assert_eq!(
        stringify(&value, Some(Replacer::Function(&mut censor)), None),
        r#"{"a":1,"b":3}"#
    );
}

#[test]
fn replacer_dropping_an_array_element_leaves_null() {
    // Array slots cannot disappear; a dropped element holds its place as
    // null. Element keys are decimal indices.
    let value = value_of("[10,20]");
    let mut drop_first = |key: &str, value: &JsonValue| -> Option<JsonValue> {
        if key == "0" {
            None
        } else {
            Some(value.clone())
        }
    };
    assert_eq!(
        stringify(&value, Some(Replacer::Function(&mut drop_first)), None),
        "[null,20]"
    );
}

#[test]
fn replacer_sees_the_root_under_the_empty_key() {
    let value = value_of("1");
    let mut seen = Vec::new();
    let mut spy = |key: &str, value: &JsonValue| -> Option<JsonValue> {
        seen.push(key.to_string());
        Some(value.clone())
    };
    stringify(&value, Some(Replacer::Function(&mut spy)), None);
    assert_eq!(seen, [""]);
}

#[test]
fn replacer_dropping_the_root_yields_null() {
    let value = value_of(r#"{"a":1}"#);
    let mut drop_all = |_key: &str, _value: &JsonValue| -> Option<JsonValue> { None };
    assert_eq!(
        stringify(&value, Some(Replacer::Function(&mut drop_all)), None),
        "null"
    );
}

// ============================================================================
// Replacer: allow-list form
// ============================================================================

#[test]
fn allow_list_selects_keys_in_list_order() {
    let value = value_of(r#"{"b":1,"a":2,"c":3}"#);
    assert_eq!(
        stringify(&value, Some(Replacer::AllowList(&["a", "c"])), None),
        r#"{"a":2,"c":3}"#
    );
}

#[test]
fn allow_list_skips_missing_keys() {
    let value = value_of(r#"{"a":2}"#);
    assert_eq!(
        stringify(&value, Some(Replacer::AllowList(&["a", "zz"])), None),
        r#"{"a":2}"#
    );
}

#[test]
fn allow_list_does_not_affect_arrays() {
    let value = value_of("[1,2]");
    assert_eq!(
        stringify(&value, Some(Replacer::AllowList(&[])), None),
        "[1,2]"
    );
}

#[test]
fn allow_list_applies_at_every_object_depth() {
    let value = value_of(r#"{"a":{"a":1,"x":2},"x":3}"#);
    assert_eq!(
        stringify(&value, Some(Replacer::AllowList(&["a"])), None),
        r#"{"a":{"a":1}}"#
    );
}

// ============================================================================
// Quoting
// ============================================================================

#[test]
fn quote_plain_string_fast_path() {
    assert_eq!(quote("plain text"), "\"plain text\"");
}

#[test]
fn quote_short_escapes() {
    assert_eq!(quote("a\tb\nc"), "\"a\\tb\\nc\"");
    assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(quote("back\\slash"), "\"back\\\\slash\"");
}

#[test]
fn quote_control_characters_as_hex_escapes() {
    assert_eq!(quote("\u{0000}"), "\"\\u0000\"");
    assert_eq!(quote("\u{001f}"), "\"\\u001f\"");
    assert_eq!(quote("\u{007f}"), "\"\\u007f\"");
}

#[test]
fn quote_invisible_and_bidi_characters() {
    // soft hyphen, left-to-right mark, line separator, BOM
    assert_eq!(quote("\u{00ad}"), "\"\\u00ad\"");
    assert_eq!(quote("\u{200e}"), "\"\\u200e\"");
    assert_eq!(quote("\u{2028}"), "\"\\u2028\"");
    assert_eq!(quote("\u{feff}"), "\"\\ufeff\"");
}

#[test]
fn quote_leaves_astral_characters_alone() {
    assert_eq!(quote("\u{1f600}"), "\"\u{1f600}\"");
}

#[test]
fn quote_round_trips_through_the_parser() {
    for s in [
        "",
        "plain",
        "with \u{0000} nul and \u{00ad} soft hyphen",
        "tabs\tand\nnewlines",
        "quotes \" and backslashes \\",
        "\u{2028}\u{2029}\u{feff}",
        "astral \u{1f600}",
    ] {
        let literal = quote(s);
        let parsed = parse(&literal, &ParseOptions::default()).unwrap();
        assert_eq!(
            parsed.data,
            JsonValue::String(s.to_string()),
            "round-trip failed for {s:?} via {literal:?}"
        );
    }
}
