use super::ProjectError;
use crate::tree::MarkupHead;

/// Placeholder spaces standing in for an elided markup head.
///
/// This is the column guarantee itself: the placeholder must be exactly as
/// wide as the syntax it replaces, counted in characters. A tag head pads to
/// its name; an attribute list pads to one separator space plus every
/// attribute's name and value text. Which stored text supplies a value's
/// width depends on its kind, fixed at adaptation; both kinds count the same
/// way here.
///
/// When the parser reported the list's source width, a disagreement with the
/// computed width fails the projection; a silently wrong column count would
/// defeat the transform's purpose.
pub(crate) fn placeholder(head: &MarkupHead) -> Result<String, ProjectError> {
    let width = match head {
        MarkupHead::Tag { name } => name.chars().count(),
        MarkupHead::Attrs {
            attributes,
            declared_width,
        } => {
            let computed = attributes.iter().fold(1, |total, attr| {
                total + attr.name.chars().count() + attr.value.text().chars().count()
            });
            if let Some(declared) = *declared_width {
                if declared != computed {
                    let names = attributes
                        .iter()
                        .map(|attr| attr.name.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    return Err(ProjectError::PaddingWidth {
                        names,
                        declared,
                        computed,
                    });
                }
            }
            computed
        }
    };
    Ok(" ".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{AttrValue, Attribute};
    use rstest::rstest;

    fn attr(name: &str, value: AttrValue) -> Attribute {
        Attribute {
            name: name.to_owned(),
            value,
        }
    }

    #[rstest]
    #[case("table", 5)]
    #[case("td", 2)]
    #[case("p", 1)]
    #[case("", 0)]
    fn test_tag_pads_to_name_width(#[case] name: &str, #[case] width: usize) {
        let head = MarkupHead::Tag {
            name: name.to_owned(),
        };
        assert_eq!(placeholder(&head).unwrap(), " ".repeat(width));
    }

    #[test]
    fn test_empty_attr_list_pads_the_separator_space() {
        let head = MarkupHead::Attrs {
            attributes: vec![],
            declared_width: None,
        };
        assert_eq!(placeholder(&head).unwrap(), " ");
    }

    #[test]
    fn test_attr_list_counts_names_and_value_text() {
        let head = MarkupHead::Attrs {
            attributes: vec![
                attr("id", AttrValue::Dynamic("items".to_owned())),
                attr("class", AttrValue::Static("table yellow".to_owned())),
            ],
            declared_width: None,
        };
        // 1 + (2 + 5) + (5 + 12)
        assert_eq!(placeholder(&head).unwrap().len(), 25);
    }

    #[test]
    fn test_value_width_is_counted_in_characters() {
        let head = MarkupHead::Attrs {
            attributes: vec![attr("label", AttrValue::Static("naïve café".to_owned()))],
            declared_width: None,
        };
        // 1 + (5 + 10), not the byte length of the value
        assert_eq!(placeholder(&head).unwrap().len(), 16);
    }

    #[test]
    fn test_matching_declared_width_passes() {
        let head = MarkupHead::Attrs {
            attributes: vec![
                attr("id", AttrValue::Dynamic("items".to_owned())),
                attr("class", AttrValue::Static("table yellow".to_owned())),
            ],
            declared_width: Some(25),
        };
        assert_eq!(placeholder(&head).unwrap(), " ".repeat(25));
    }

    #[test]
    fn test_mismatched_declared_width_fails() {
        let head = MarkupHead::Attrs {
            attributes: vec![
                attr("id", AttrValue::Dynamic("items".to_owned())),
                attr("class", AttrValue::Static("table yellow".to_owned())),
            ],
            declared_width: Some(26),
        };
        let err = placeholder(&head).unwrap_err();
        let ProjectError::PaddingWidth {
            names,
            declared,
            computed,
        } = err
        else {
            panic!("expected a padding width error");
        };
        assert_eq!(names, "id class");
        assert_eq!(declared, 26);
        assert_eq!(computed, 25);
    }
}
