//! Provides the `Value` type that attribute expressions evaluate to.

use hcl::Expression;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};

/// The map type used for objects.
pub type Map<K, V> = BTreeMap<K, V>;

/// The result of evaluating an attribute expression without any variables or functions in
/// scope.
///
/// Equality is structural and tag-sensitive: values of different kinds never compare equal, so
/// the string `"1"` is not equal to the number `1`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Represents a HCL null value.
    #[default]
    Null,
    /// Represents a HCL boolean.
    Bool(bool),
    /// Represents a HCL number.
    Number(Number),
    /// Represents a HCL string.
    String(String),
    /// Represents a HCL tuple or list.
    List(Vec<Value>),
    /// Represents a HCL object.
    Object(Map<String, Value>),
    /// An expression that cannot be evaluated without external context, e.g. a reference to
    /// `var.region` or a function call.
    ///
    /// The unevaluated expression is only retained for display. All unknowns compare equal to
    /// each other, so `var.a` and `var.b` are indistinguishable.
    Unknown(Expression),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Unknown(_), Value::Unknown(_)) => true,
            (_, _) => false,
        }
    }
}

impl Value {
    /// Returns `true` if the value could not be evaluated.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl From<hcl::Value> for Value {
    fn from(value: hcl::Value) -> Self {
        match value {
            hcl::Value::Null => Value::Null,
            hcl::Value::Bool(b) => Value::Bool(b),
            hcl::Value::Number(n) => Value::Number(n.into()),
            hcl::Value::String(s) => Value::String(s),
            hcl::Value::Array(array) => Value::List(array.into_iter().map(Value::from).collect()),
            hcl::Value::Object(object) => Value::Object(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(list) => list.serialize(serializer),
            Value::Object(object) => object.serialize(serializer),
            Value::Unknown(expr) => {
                let repr = hcl::format::to_string(expr).unwrap_or_else(|_| format!("{expr:?}"));
                serializer.serialize_str(&format!("(unknown) {repr}"))
            }
        }
    }
}

/// Represents a HCL number.
///
/// Integers and floats compare by exact numeric value, so `1` and `1.0` are equal but
/// `9007199254740993` is not equal to the float `9007199254740992.0` it would round to.
#[derive(Clone, Copy)]
pub struct Number {
    n: N,
}

#[derive(Clone, Copy)]
enum N {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

impl Number {
    /// Converts a finite `f64` to a `Number`. Infinite or NaN values are not HCL numbers.
    pub fn from_f64(f: f64) -> Option<Number> {
        f.is_finite().then_some(Number { n: N::Float(f) })
    }

    /// Represents the `Number` as f64.
    pub fn as_f64(&self) -> f64 {
        match self.n {
            N::PosInt(n) => n as f64,
            N::NegInt(n) => n as f64,
            N::Float(n) => n,
        }
    }

    /// Returns true if the `Number` is a float.
    pub fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.n, other.n) {
            (N::PosInt(a), N::PosInt(b)) => a == b,
            (N::NegInt(a), N::NegInt(b)) => a == b,
            (N::PosInt(_), N::NegInt(_)) | (N::NegInt(_), N::PosInt(_)) => false,
            (N::Float(a), N::Float(b)) => a == b,
            (N::PosInt(i), N::Float(f)) | (N::Float(f), N::PosInt(i)) => {
                // 2^64 is exactly representable, `u64::MAX as f64` is not.
                f.fract() == 0.0
                    && (0.0..18_446_744_073_709_551_616.0).contains(&f)
                    && f as u64 == i
            }
            (N::NegInt(i), N::Float(f)) | (N::Float(f), N::NegInt(i)) => {
                f.fract() == 0.0 && (i64::MIN as f64..0.0).contains(&f) && f as i64 == i
            }
        }
    }
}

impl From<hcl::Number> for Number {
    fn from(num: hcl::Number) -> Self {
        let n = if let Some(pos) = num.as_u64() {
            N::PosInt(pos)
        } else if let Some(neg) = num.as_i64() {
            N::NegInt(neg)
        } else {
            // hcl numbers are always finite.
            N::Float(num.as_f64().unwrap_or_default())
        };

        Number { n }
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(u: $ty) -> Self {
                    Number { n: N::PosInt(u as u64) }
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(i: $ty) -> Self {
                    let n = if i < 0 {
                        N::NegInt(i as i64)
                    } else {
                        N::PosInt(i as u64)
                    };

                    Number { n }
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.n {
            N::PosInt(i) => Display::fmt(&i, f),
            N::NegInt(i) => Display::fmt(&i, f),
            N::Float(v) => Display::fmt(&v, f),
        }
    }
}

impl Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Number({self})")
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.n {
            N::PosInt(i) => serializer.serialize_u64(i),
            N::NegInt(i) => serializer.serialize_i64(i),
            N::Float(f) => serializer.serialize_f64(f),
        }
    }
}
