//! Reusable string validators

use super::diagnostics::Diagnostics;
use super::schema::StringValidator;

/// Accept only one of a fixed set of values
#[derive(Debug, Clone)]
pub struct OneOf {
    allowed: Vec<String>,
}

pub fn one_of<I, S>(allowed: I) -> OneOf
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OneOf {
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

impl StringValidator for OneOf {
    fn description(&self) -> String {
        format!("value must be one of: {}", self.allowed.join(", "))
    }

    fn validate(&self, attribute: &str, value: &str, diagnostics: &mut Diagnostics) {
        if !self.allowed.iter().any(|allowed| allowed == value) {
            diagnostics.add_attribute_error(
                attribute,
                "Invalid Attribute Value Match",
                format!("Attribute {} {}, got: \"{}\"", attribute, self.description(), value),
            );
        }
    }
}

/// Require a minimum string length, counted in characters
#[derive(Debug, Clone, Copy)]
pub struct LengthAtLeast(pub usize);

pub fn length_at_least(min: usize) -> LengthAtLeast {
    LengthAtLeast(min)
}

impl StringValidator for LengthAtLeast {
    fn description(&self) -> String {
        format!("string length must be at least {}", self.0)
    }

    fn validate(&self, attribute: &str, value: &str, diagnostics: &mut Diagnostics) {
        let length = value.chars().count();
        if length < self.0 {
            diagnostics.add_attribute_error(
                attribute,
                "Invalid Attribute Value Length",
                format!("Attribute {} {}, got: {}", attribute, self.description(), length),
            );
        }
    }
}
