use formly_manipulators::ml_parser::{
    all_elements, apply_edits, serialize_attribute, tokenize, Element, Node, ParseTreeResult,
    Parser, TextEdit, TokenType,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParseTreeResult {
        Parser::new().parse(source, "fragment.html")
    }

    fn element(node: &Node) -> &Element {
        match node {
            Node::Element(el) => el,
            other => panic!("expected element, got {:?}", other),
        }
    }

    mod elements {
        use super::*;

        #[test]
        fn should_parse_multiple_root_nodes() {
            let result = parse("<label>Name</label>\n<input ng-model=\"m\">");
            assert!(!result.has_errors());
            assert_eq!(result.root_nodes.len(), 3);
            assert_eq!(element(&result.root_nodes[0]).name, "label");
            assert!(matches!(&result.root_nodes[1], Node::Text(text) if text.value == "\n"));
            assert_eq!(element(&result.root_nodes[2]).name, "input");
        }

        #[test]
        fn should_walk_elements_depth_first() {
            let result = parse("<div><p><b>x</b></p><span></span></div><i></i>");
            let names: Vec<&str> = all_elements(&result.root_nodes)
                .iter()
                .map(|el| el.name.as_str())
                .collect();
            assert_eq!(names, vec!["div", "p", "b", "span", "i"]);
        }

        #[test]
        fn should_preserve_tag_name_case() {
            let result = parse("<My-Input NG-MODEL=\"m\"></my-input>");
            assert!(!result.has_errors());
            let el = element(&result.root_nodes[0]);
            assert_eq!(el.name, "My-Input");
            assert_eq!(el.attrs[0].name, "NG-MODEL");
            assert!(el.has_attr("ng-model"));
        }

        #[test]
        fn should_mark_self_closing_and_void_elements() {
            let result = parse("<custom-field /><br><input>");
            assert!(!result.has_errors());
            let custom = element(&result.root_nodes[0]);
            assert!(custom.is_self_closing);
            assert!(!custom.is_void);
            let br = element(&result.root_nodes[1]);
            assert!(br.is_void);
            assert!(br.end_source_span.is_none());
        }

        #[test]
        fn should_span_the_whole_element() {
            let source = "<div class=\"a\">text</div>";
            let result = parse(source);
            let div = element(&result.root_nodes[0]);
            assert_eq!(div.source_span.text(source), source);
            assert_eq!(div.start_source_span.text(source), "<div class=\"a\">");
            assert_eq!(div.end_source_span.map(|span| span.text(source)), Some("</div>"));
        }

        #[test]
        fn should_keep_comments_doctypes_and_raw_text() {
            let result = parse("<!-- c --><!doctype html><textarea><input ng-model=\"x\"></textarea>");
            assert!(!result.has_errors());
            assert!(matches!(&result.root_nodes[0], Node::Comment(c) if c.value == " c "));
            assert!(matches!(&result.root_nodes[1], Node::DocType(_)));
            let textarea = element(&result.root_nodes[2]);
            assert_eq!(textarea.children.len(), 1);
            assert!(matches!(&textarea.children[0], Node::Text(t) if t.value == "<input ng-model=\"x\">"));
        }

        #[test]
        fn should_not_treat_interpolated_angle_brackets_as_tags() {
            let result = parse("<p>{{ a < b ? 'x' : 'y' }}</p>");
            assert!(!result.has_errors());
            assert_eq!(all_elements(&result.root_nodes).len(), 1);
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn should_read_quoted_unquoted_and_bare_values() {
            let result = parse("<input a=\"1\" b='2' c=3 d>");
            let input = element(&result.root_nodes[0]);
            assert_eq!(input.attr_value("a"), Some("1"));
            assert_eq!(input.attr_value("b"), Some("2"));
            assert_eq!(input.attr_value("c"), Some("3"));
            assert_eq!(input.get_attr("d").and_then(|a| a.value.clone()), None);
            assert_eq!(input.attr_value("d"), Some(""));
            assert_eq!(input.attr_value("e"), None);
        }

        #[test]
        fn should_keep_values_raw() {
            let result = parse("<input placeholder=\"a &amp; b\">");
            let input = element(&result.root_nodes[0]);
            assert_eq!(input.attr_value("placeholder"), Some("a &amp; b"));
        }

        #[test]
        fn should_split_class_names() {
            let result = parse("<input class=\"  one   two\tthree \">");
            let input = element(&result.root_nodes[0]);
            assert_eq!(input.class_names().collect::<Vec<_>>(), vec!["one", "two", "three"]);
        }

        #[test]
        fn should_insert_after_tag_name_without_attributes() {
            let source = "<input/>";
            let result = parse(source);
            let input = element(&result.root_nodes[0]);
            assert_eq!(input.attr_insertion_offset(), "<input".len());
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_unterminated_attribute_values() {
            let result = parse("<input ng-model=\"oops>");
            assert!(result.has_errors());
            assert_eq!(result.errors[0].msg, "Unterminated quoted attribute value");
        }

        #[test]
        fn should_report_unterminated_comments() {
            let result = parse("<!-- never closed");
            assert_eq!(result.errors[0].msg, "Unexpected character \"EOF\"");
        }

        #[test]
        fn should_report_end_tags_on_void_elements() {
            let result = parse("<input></input>");
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].msg, "Void elements do not have end tags \"input\"");
        }

        #[test]
        fn should_report_implicitly_closed_elements() {
            let result = parse("<div><span></div>");
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].msg, "Unclosed element \"span\"");
            assert_eq!(element(&result.root_nodes[0]).children.len(), 1);
        }

        #[test]
        fn should_close_optional_end_tag_elements_without_errors() {
            let result = parse("<select ng-model=\"m\"><option>a<option>b</select><p>text");
            assert!(!result.has_errors());
            let names: Vec<&str> = all_elements(&result.root_nodes)
                .iter()
                .map(|el| el.name.as_str())
                .collect();
            assert_eq!(names, vec!["select", "option", "option", "p"]);
        }

        #[test]
        fn should_locate_errors() {
            let result = parse("<div>\n  </span>\n</div>");
            let error = &result.errors[0];
            assert_eq!(error.span.start.line, 1);
            assert_eq!(error.span.start.col, 2);
            assert_eq!(error.to_string(), "Unexpected closing tag \"span\" at 1:2");

            let message = error.contextual_message(&result.file, 20);
            assert!(message.contains("[ERROR ->]</span>"));
            assert!(message.ends_with("fragment.html@1:2"));
        }
    }

    mod tokens {
        use super::*;

        #[test]
        fn should_end_with_eof() {
            let result = tokenize("<a></a>");
            assert_eq!(
                result.tokens.iter().map(|t| t.token_type).collect::<Vec<_>>(),
                vec![TokenType::TagOpenStart, TokenType::TagOpenEnd, TokenType::TagClose, TokenType::Eof]
            );
        }
    }

    mod edits {
        use super::*;

        #[test]
        fn should_leave_unedited_source_byte_identical() {
            let source = "<div  class='x'>\n\t<input ng-model=m>\n</div>";
            assert_eq!(apply_edits(source, Vec::new()).unwrap(), source);
        }

        #[test]
        fn should_apply_edits_in_source_order() {
            let source = "<input a=\"1\" b>";
            let edits = vec![
                TextEdit::insert(14, " c"),
                TextEdit::replace(7, 12, "a=\"2\""),
                TextEdit::insert(14, " d"),
            ];
            assert_eq!(apply_edits(source, edits).unwrap(), "<input a=\"2\" b c d>");
        }

        #[test]
        fn should_serialize_attributes() {
            assert_eq!(serialize_attribute("required", None), "required");
            assert_eq!(serialize_attribute("title", Some("say \"hi\" & go")), "title=\"say &quot;hi&quot; &amp; go\"");
        }
    }
}
