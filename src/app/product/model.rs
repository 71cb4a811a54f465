//! 产品数据模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// `NUMERIC(10,2)` 能容纳的上界（不含）
pub const PRICE_UPPER_BOUND: i64 = 100_000_000;

/// 产品实体，每次请求从查询结果新建
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(with = "price")]
    pub price: Decimal,
}

/// 创建/更新请求体，总是同时提供 `name` 和 `price`
///
/// 其他字段（包括客户端传来的 `id`）会被忽略。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(deserialize_with = "price::deserialize")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("name must not be empty".into()));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(
            ValidationError::new("negative").with_message("price must not be negative".into())
        );
    }
    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("precision")
            .with_message("price must have at most two decimal places".into()));
    }
    if *price >= Decimal::from(PRICE_UPPER_BOUND) {
        return Err(ValidationError::new("range")
            .with_message("price must be less than 100000000".into()));
    }
    Ok(())
}

/// 价格的线格式：序列化为两位小数的字符串，反序列化接受字符串或数字
pub mod price {
    use rust_decimal::Decimal;
    use serde::{de, Deserializer, Serializer};
    use std::{fmt, str::FromStr};

    pub fn serialize<S>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", price))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }

    struct PriceVisitor;

    impl<'de> de::Visitor<'de> for PriceVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal number or a numeric string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            Decimal::from_str(v.trim())
                .map_err(|_| E::custom(format!("price is not a valid decimal: {:?}", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            Decimal::try_from(v).map_err(|_| E::custom(format!("price is out of range: {}", v)))
        }
    }
}
