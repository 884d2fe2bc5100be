//! Tests for the filter parser.

use super::*;

// ==================== Simple Form Tests ====================

#[test]
fn test_parse_simple_equality() {
    let filter = FilterParser::parse("sAMAccountName=jsmith").unwrap();
    assert_eq!(filter, Filter::equals("sAMAccountName", "jsmith"));
}

#[test]
fn test_parse_simple_trims_whitespace() {
    let filter = FilterParser::parse("  mail = jsmith@example.com  ").unwrap();
    assert_eq!(filter, Filter::equals("mail", "jsmith@example.com"));
}

#[test]
fn test_parse_simple_presence() {
    let filter = FilterParser::parse("mail=*").unwrap();
    assert_eq!(filter, Filter::Present("mail".to_string()));
}

#[test]
fn test_parse_simple_value_keeps_later_equals() {
    // Only the first '=' splits attribute from value.
    let filter = FilterParser::parse("description=a=b").unwrap();
    assert_eq!(filter, Filter::equals("description", "a=b"));
}

#[test]
fn test_parse_simple_without_operator_fails() {
    let err = FilterParser::parse("jsmith").unwrap_err();
    assert_eq!(
        err,
        FilterError::MissingOperator {
            fragment: "jsmith".to_string()
        }
    );
}

#[test]
fn test_parse_simple_without_attribute_fails() {
    let err = FilterParser::parse("=jsmith").unwrap_err();
    assert!(matches!(err, FilterError::MissingAttribute { .. }));
}

// ==================== Item Tests ====================

#[test]
fn test_parse_equality_item() {
    let filter = FilterParser::parse("(cn=John Smith)").unwrap();
    assert_eq!(filter, Filter::equals("cn", "John Smith"));
}

#[test]
fn test_parse_presence_item() {
    let filter = FilterParser::parse("(mail=*)").unwrap();
    assert_eq!(filter, Filter::Present("mail".to_string()));
}

#[test]
fn test_parse_substring_item() {
    let filter = FilterParser::parse("(cn=john*)").unwrap();
    assert_eq!(
        filter,
        Filter::Substring {
            attribute: "cn".to_string(),
            pattern: "john*".to_string(),
        }
    );

    let filter = FilterParser::parse("(mail=*@example.com)").unwrap();
    assert_eq!(
        filter,
        Filter::Substring {
            attribute: "mail".to_string(),
            pattern: "*@example.com".to_string(),
        }
    );
}

#[test]
fn test_parse_ordering_items() {
    assert_eq!(
        FilterParser::parse("(uidNumber>=1000)").unwrap(),
        Filter::compare("uidNumber", CompareOp::Ge, "1000")
    );
    assert_eq!(
        FilterParser::parse("(uidNumber>1000)").unwrap(),
        Filter::compare("uidNumber", CompareOp::Gt, "1000")
    );
    assert_eq!(
        FilterParser::parse("(uidNumber<=1000)").unwrap(),
        Filter::compare("uidNumber", CompareOp::Le, "1000")
    );
    assert_eq!(
        FilterParser::parse("(uidNumber<1000)").unwrap(),
        Filter::compare("uidNumber", CompareOp::Lt, "1000")
    );
}

#[test]
fn test_parse_ge_is_not_gt_then_equals() {
    // '>=' must win over '>' followed by a value starting with '='.
    let filter = FilterParser::parse("(userAccountControl>=512)").unwrap();
    assert_eq!(
        filter,
        Filter::compare("userAccountControl", CompareOp::Ge, "512")
    );
}

#[test]
fn test_parse_item_with_whitespace() {
    let filter = FilterParser::parse("( cn = John )").unwrap();
    assert_eq!(filter, Filter::equals("cn", "John"));
}

#[test]
fn test_parse_empty_value_is_allowed() {
    let filter = FilterParser::parse("(description=)").unwrap();
    assert_eq!(filter, Filter::equals("description", ""));
}

#[test]
fn test_parse_presence_only_under_equality() {
    // A '*' value under an ordering operator stays a literal comparison.
    let filter = FilterParser::parse("(uidNumber>=*)").unwrap();
    assert_eq!(filter, Filter::compare("uidNumber", CompareOp::Ge, "*"));
}

// ==================== Boolean Composition Tests ====================

#[test]
fn test_parse_and() {
    let filter = FilterParser::parse("(&(a=1)(b=2))").unwrap();
    assert_eq!(
        filter,
        Filter::and(vec![Filter::equals("a", "1"), Filter::equals("b", "2")])
    );
}

#[test]
fn test_parse_or() {
    let filter = FilterParser::parse("(|(a=1)(b=2)(c=3))").unwrap();
    assert_eq!(
        filter,
        Filter::or(vec![
            Filter::equals("a", "1"),
            Filter::equals("b", "2"),
            Filter::equals("c", "3"),
        ])
    );
}

#[test]
fn test_parse_not() {
    let filter = FilterParser::parse("(!(lockoutTime=*))").unwrap();
    assert_eq!(
        filter,
        Filter::negate(Filter::Present("lockoutTime".to_string()))
    );
}

#[test]
fn test_parse_single_operand_group() {
    let filter = FilterParser::parse("(&(a=1))").unwrap();
    assert_eq!(filter, Filter::and(vec![Filter::equals("a", "1")]));
}

#[test]
fn test_parse_nested_composition() {
    let filter =
        FilterParser::parse("(&(objectClass=user)(|(memberOf=Admins)(uidNumber>=1000))(!(c=x)))")
            .unwrap();
    assert_eq!(
        filter,
        Filter::and(vec![
            Filter::equals("objectClass", "user"),
            Filter::or(vec![
                Filter::equals("memberOf", "Admins"),
                Filter::compare("uidNumber", CompareOp::Ge, "1000"),
            ]),
            Filter::negate(Filter::equals("c", "x")),
        ])
    );
}

#[test]
fn test_parse_with_whitespace_between_groups() {
    let filter = FilterParser::parse("( & (a=1) (b=2) )").unwrap();
    assert_eq!(
        filter,
        Filter::and(vec![Filter::equals("a", "1"), Filter::equals("b", "2")])
    );
}

// ==================== Error Tests ====================

#[test]
fn test_parse_empty_string_fails() {
    assert_eq!(
        FilterParser::parse("").unwrap_err(),
        FilterError::EmptyExpression
    );
    assert_eq!(
        FilterParser::parse("   ").unwrap_err(),
        FilterError::EmptyExpression
    );
}

#[test]
fn test_parse_unbalanced_fails() {
    let err = FilterParser::parse("(&(a=1)").unwrap_err();
    assert!(matches!(err, FilterError::UnclosedParenthesis { .. }));

    let err = FilterParser::parse("(a=1").unwrap_err();
    assert!(matches!(err, FilterError::UnclosedParenthesis { .. }));
}

#[test]
fn test_parse_empty_group_fails() {
    assert!(matches!(
        FilterParser::parse("()").unwrap_err(),
        FilterError::EmptyGroup { .. }
    ));
    assert!(matches!(
        FilterParser::parse("(&)").unwrap_err(),
        FilterError::EmptyGroup { .. }
    ));
    assert!(matches!(
        FilterParser::parse("(|)").unwrap_err(),
        FilterError::EmptyGroup { .. }
    ));
}

#[test]
fn test_parse_item_without_operator_fails() {
    let err = FilterParser::parse("(jsmith)").unwrap_err();
    assert_eq!(
        err,
        FilterError::MissingOperator {
            fragment: "(jsmith)".to_string()
        }
    );
}

#[test]
fn test_parse_item_without_attribute_fails() {
    let err = FilterParser::parse("(=jsmith)").unwrap_err();
    assert!(matches!(err, FilterError::MissingAttribute { .. }));
}

#[test]
fn test_parse_not_without_group_fails() {
    let err = FilterParser::parse("(!)").unwrap_err();
    assert!(matches!(err, FilterError::ExpectedGroup { .. }));
}

#[test]
fn test_parse_trailing_input_fails() {
    let err = FilterParser::parse("(a=1)(b=2)").unwrap_err();
    assert_eq!(
        err,
        FilterError::TrailingInput {
            fragment: "(b=2)".to_string()
        }
    );
}

#[test]
fn test_parse_error_names_offending_fragment() {
    let err = FilterParser::parse("(&(a=1)(broken)").unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains("(broken)"),
        "message should name the fragment: {}",
        message
    );
}

// ==================== Parse-and-Evaluate Tests ====================

fn matches(expression: &str, record: &crate::Record) -> bool {
    let filter = FilterParser::parse(expression).unwrap();
    FilterEvaluator::new(&filter).matches(record)
}

#[test]
fn test_parsed_and_over_two_attributes() {
    let mut record = crate::Record::new();
    record.set("a", "1");
    record.set("b", "2");
    assert!(matches("(&(a=1)(b=2))", &record));

    record.set("b", "3");
    assert!(!matches("(&(a=1)(b=2))", &record));
}

#[test]
fn test_parsed_numeric_coercion() {
    let mut record = crate::Record::new();
    record.set("userAccountControl", "514");
    assert!(matches("(userAccountControl>=512)", &record));

    record.set("userAccountControl", "500");
    assert!(!matches("(userAccountControl>=512)", &record));
}

#[test]
fn test_parsed_list_membership() {
    let mut record = crate::Record::new();
    record.set(
        "memberOf",
        vec!["Admins".to_string(), "Users".to_string()],
    );
    assert!(matches("(memberOf=Admins)", &record));
    assert!(!matches("(memberOf=Guests)", &record));
}

#[test]
fn test_parsed_wildcard() {
    let mut john = crate::Record::new();
    john.set("cn", "johndoe");
    let mut jane = crate::Record::new();
    jane.set("cn", "janedoe");

    assert!(matches("(cn=john*)", &john));
    assert!(!matches("(cn=john*)", &jane));
}

// ==================== Round-trip Tests ====================

#[test]
fn test_parse_display_round_trip() {
    let inputs = [
        "(&(objectClass=user)(uidNumber>=1000))",
        "(|(memberOf=Admins)(memberOf=Operators))",
        "(!(lockoutTime=*))",
        "(cn=jo*n*)",
    ];
    for input in inputs {
        let filter = FilterParser::parse(input).unwrap();
        assert_eq!(filter.to_string(), input);
    }
}
