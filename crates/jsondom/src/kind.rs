use core::fmt;

/// The discriminant of a [`Value`](crate::Value).
///
/// Variants are declared in rank order, so the derived `Ord` is the cross-kind ordering used by
/// the comparison engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Null,
    Bool,
    Integer,
    Double,
    String,
    Array,
    Object,
    Reference,
}

impl Kind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Integer => "integer",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Reference => "reference",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_order() {
        let ranked = [
            Kind::Null,
            Kind::Bool,
            Kind::Integer,
            Kind::Double,
            Kind::String,
            Kind::Array,
            Kind::Object,
        ];
        for pair in ranked.windows(2) {
            assert!(pair[0] < pair[1], "{} should rank below {}", pair[0], pair[1]);
        }
    }
}
