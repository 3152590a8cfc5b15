//! Typed records and field resolution
//!
//! A record exposes its fields in declaration order together with their
//! alias annotations. A schema field name resolves to a record field when:
//!
//! 1. the field's own name equals it ignoring case, or
//! 2. the first comma-separated segment of the `json` tag equals it exactly, or
//! 3. the first comma-separated segment of the `yaml` tag equals it exactly.
//!
//! The first matching field wins. Mapping inputs do not go through this
//! resolver; they use exact key lookup.

use super::value::Value;

/// A statically-shaped value whose fields can be listed.
///
/// Implement by hand or with the [`record!`](crate::record) macro.
pub trait Record {
    /// Returns the fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// One declared field of a record.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    /// Field name as declared on the type
    pub name: &'a str,
    /// Serialization alias annotation, e.g. `"user_id,omitempty"`
    pub json: Option<&'a str>,
    /// Schema alias annotation
    pub yaml: Option<&'a str>,
    /// Field value
    pub value: Value<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: Value<'a>) -> Self {
        Self {
            name,
            json: None,
            yaml: None,
            value,
        }
    }

    /// Sets the serialization alias annotation.
    pub fn json(mut self, tag: &'a str) -> Self {
        self.json = Some(tag);
        self
    }

    /// Sets the schema alias annotation.
    pub fn yaml(mut self, tag: &'a str) -> Self {
        self.yaml = Some(tag);
        self
    }

    /// Returns true if this field answers to `target`.
    pub fn matches(&self, target: &str) -> bool {
        eq_ignore_case(self.name, target)
            || tag_name(self.json) == Some(target)
            || tag_name(self.yaml) == Some(target)
    }
}

/// Finds the field that answers to `name`, scanning in declaration order.
pub fn resolve_field<'f, 'a>(fields: &'f [Field<'a>], name: &str) -> Option<&'f Field<'a>> {
    fields.iter().find(|field| field.matches(name))
}

/// First comma-separated segment of a non-empty tag.
fn tag_name(tag: Option<&str>) -> Option<&str> {
    match tag {
        Some(tag) if !tag.is_empty() => tag.split(',').next(),
        _ => None,
    }
}

/// Unicode-aware case-insensitive equality without allocating.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Implements [`Record`] and [`ToValue`](crate::ToValue) for a struct.
///
/// Each listed field may carry `json = "..."` and `yaml = "..."` alias
/// annotations in parentheses. Field types must implement `ToValue`;
/// nested records declared with this macro qualify.
///
/// ```
/// use fieldrules::record;
///
/// struct Skill {
///     user_id: i64,
///     name: Option<String>,
/// }
///
/// record!(Skill {
///     user_id(json = "user_id,omitempty"),
///     name,
/// });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $( $field:ident $( ( $( $tag:ident = $alias:literal ),+ ) )? ),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::Field::new(
                            stringify!($field),
                            $crate::ToValue::to_value(&self.$field),
                        )
                        $( $( .$tag($alias) )+ )?
                    ),*
                ]
            }
        }

        impl $crate::ToValue for $ty {
            fn to_value(&self) -> $crate::Value<'_> {
                $crate::Value::Record(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToValue;

    struct Skill {
        user_id: i64,
        skill_name: String,
        level: Option<u8>,
    }

    crate::record!(Skill {
        user_id(json = "user_id,omitempty"),
        skill_name(json = "name,omitempty", yaml = "title"),
        level,
    });

    fn sample() -> Skill {
        Skill {
            user_id: 7,
            skill_name: "rust".into(),
            level: None,
        }
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let skill = sample();
        let names: Vec<&str> = skill.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["user_id", "skill_name", "level"]);
    }

    #[test]
    fn test_resolve_by_name_ignoring_case() {
        let skill = sample();
        let fields = skill.fields();
        assert_eq!(resolve_field(&fields, "USER_ID").unwrap().name, "user_id");
        assert_eq!(resolve_field(&fields, "Level").unwrap().name, "level");
    }

    #[test]
    fn test_resolve_by_json_tag_first_segment() {
        let skill = sample();
        let fields = skill.fields();
        assert_eq!(resolve_field(&fields, "name").unwrap().name, "skill_name");
        assert!(resolve_field(&fields, "omitempty").is_none());
    }

    #[test]
    fn test_tag_match_is_exact() {
        let skill = sample();
        let fields = skill.fields();
        assert!(resolve_field(&fields, "NAME").is_none());
        assert!(resolve_field(&fields, "Title").is_none());
    }

    #[test]
    fn test_resolve_by_yaml_tag() {
        let skill = sample();
        let fields = skill.fields();
        assert_eq!(resolve_field(&fields, "title").unwrap().name, "skill_name");
    }

    #[test]
    fn test_unresolved_field() {
        let skill = sample();
        let fields = skill.fields();
        assert!(resolve_field(&fields, "email").is_none());
    }

    #[test]
    fn test_none_field_resolves_to_null() {
        let skill = sample();
        let fields = skill.fields();
        assert!(resolve_field(&fields, "level").unwrap().value.is_null());
    }

    #[test]
    fn test_first_match_wins() {
        struct Pair {
            a: String,
            b: String,
        }
        crate::record!(Pair {
            a(json = "key"),
            b(json = "key"),
        });

        let pair = Pair {
            a: "first".into(),
            b: "second".into(),
        };
        let fields = pair.fields();
        assert_eq!(resolve_field(&fields, "key").unwrap().name, "a");
    }

    #[test]
    fn test_empty_tag_ignored() {
        let fields = vec![Field::new("Value", Value::Bool(true)).json("")];
        assert!(resolve_field(&fields, "").is_none());
        assert!(resolve_field(&fields, "value").is_some());
    }

    #[test]
    fn test_unicode_case_folding() {
        assert!(eq_ignore_case("Größe", "GRÖßE"));
        assert!(eq_ignore_case("Ärger", "ärger"));
        assert!(!eq_ignore_case("Ärger", "arger"));
    }

    #[test]
    fn test_record_to_value() {
        let skill = sample();
        assert!(matches!(skill.to_value(), Value::Record(_)));
    }
}
