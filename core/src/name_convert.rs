//! Name conversion — the three casing forms a routing coordinate takes.
//!
//! A controller token addresses two different worlds: URLs/display (stable
//! snake form) and calling code (class and method casing conventions).
//! [`convert_names`] derives all three at once; with conversion disabled
//! every form is the input token verbatim.

/// The casing forms derived from a controller token and an action token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameForms {
    /// Controller identifier: lowercased, underscores preserved.
    pub ctrl: String,
    /// Controller class name: upper-camel (`user_profile` → `UserProfile`).
    pub class: String,
    /// Action method name: lower-camel (`get_info` → `getInfo`).
    pub method: String,
}

/// Derive the identifier, class, and method forms for a controller/action
/// token pair.
///
/// With `convert = false` all three outputs equal their input token with no
/// case change at all.
///
/// # Example
///
/// ```
/// use ruta::convert_names;
///
/// let forms = convert_names("user_profile", "get_user_info", true);
/// assert_eq!(forms.ctrl, "user_profile");
/// assert_eq!(forms.class, "UserProfile");
/// assert_eq!(forms.method, "getUserInfo");
///
/// let forms = convert_names("UserProfile", "getInfo", false);
/// assert_eq!(forms.ctrl, "UserProfile");
/// assert_eq!(forms.class, "UserProfile");
/// assert_eq!(forms.method, "getInfo");
/// ```
#[must_use]
pub fn convert_names(controller: &str, action: &str, convert: bool) -> NameForms {
    if convert {
        NameForms {
            ctrl: controller.to_lowercase(),
            class: pascal_case(controller),
            method: camel_case(action),
        }
    } else {
        NameForms {
            ctrl: controller.to_string(),
            class: controller.to_string(),
            method: action.to_string(),
        }
    }
}

/// Upper-camel a snake token: capitalize the first character of each
/// underscore-delimited word and drop the underscores. Characters after the
/// first of each word keep their original case.
pub(crate) fn pascal_case(token: &str) -> String {
    token.split('_').map(capitalize).collect()
}

/// Lower-camel a snake token: [`pascal_case`] with the first character
/// lowercased.
pub(crate) fn camel_case(token: &str) -> String {
    lower_first(&pascal_case(token))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_to_class_and_method() {
        let forms = convert_names("get_user_info", "get_user_info", true);
        assert_eq!(forms.class, "GetUserInfo");
        assert_eq!(forms.method, "getUserInfo");
        assert_eq!(forms.ctrl, "get_user_info");
    }

    #[test]
    fn single_word() {
        let forms = convert_names("blog", "read", true);
        assert_eq!(forms.ctrl, "blog");
        assert_eq!(forms.class, "Blog");
        assert_eq!(forms.method, "read");
    }

    #[test]
    fn convert_false_is_verbatim() {
        let forms = convert_names("UserProfile", "getInfo", false);
        assert_eq!(forms.ctrl, "UserProfile");
        assert_eq!(forms.class, "UserProfile");
        assert_eq!(forms.method, "getInfo");
    }

    #[test]
    fn mixed_case_input_is_lowered_for_ctrl_only() {
        let forms = convert_names("UserProfile", "GetInfo", true);
        assert_eq!(forms.ctrl, "userprofile");
        // only the first character of each word changes case
        assert_eq!(forms.class, "UserProfile");
        assert_eq!(forms.method, "getInfo");
    }

    #[test]
    fn consecutive_underscores_collapse() {
        assert_eq!(pascal_case("a__b"), "AB");
        assert_eq!(camel_case("__x"), "x");
    }

    #[test]
    fn empty_tokens() {
        let forms = convert_names("", "", true);
        assert_eq!(forms.ctrl, "");
        assert_eq!(forms.class, "");
        assert_eq!(forms.method, "");
    }
}
