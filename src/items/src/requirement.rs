// src/items/src/requirement.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use stats::Attribute;

/// 属性需求（目录原始数据：属性名 + 数值）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub amount: u32,
}

impl Requirement {
    pub fn new(attribute: Attribute, amount: u32) -> Self {
        Self {
            name: attribute.to_string(),
            amount,
        }
    }

    /// 解析属性名，未知属性返回 None
    pub fn attribute(&self) -> Option<Attribute> {
        self.name.parse().ok()
    }

    fn from_value(value: &Value) -> Option<Self> {
        let name = value.get("name")?.as_str()?;
        let amount = value.get("amount")?;
        let amount = match amount.as_u64() {
            Some(n) => n.min(u32::MAX as u64) as u32,
            None => {
                let n = amount.as_f64()?;
                if n < 0.0 {
                    return None;
                }
                n as u32
            }
        };
        Some(Self {
            name: name.to_string(),
            amount,
        })
    }
}

/// 宽松解析需求列表：缺失、null、非数组或格式错误的条目一律视为无需求
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Vec<Requirement>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(entries)) => entries.iter().filter_map(Requirement::from_value).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lenient")]
        requires: Vec<Requirement>,
    }

    fn parse(json: &str) -> Vec<Requirement> {
        serde_json::from_str::<Holder>(json).unwrap().requires
    }

    #[test]
    fn keeps_well_formed_pairs() {
        let reqs = parse(r#"{"requires":[{"name":"Str","amount":12},{"name":"Dex","amount":18}]}"#);
        assert_eq!(
            reqs,
            vec![
                Requirement { name: "Str".into(), amount: 12 },
                Requirement { name: "Dex".into(), amount: 18 },
            ]
        );
        assert_eq!(reqs[0].attribute(), Some(Attribute::Strength));
    }

    #[test]
    fn malformed_lists_mean_no_requirements() {
        assert!(parse(r#"{}"#).is_empty());
        assert!(parse(r#"{"requires":null}"#).is_empty());
        assert!(parse(r#"{"requires":"Str 10"}"#).is_empty());
        assert!(parse(r#"{"requires":{"name":"Str","amount":10}}"#).is_empty());
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let reqs = parse(
            r#"{"requires":[{"name":"Int","amount":"ten"},{"amount":3},{"name":"Fai","amount":-1},{"name":"Arc","amount":7.0}]}"#,
        );
        assert_eq!(reqs, vec![Requirement { name: "Arc".into(), amount: 7 }]);
    }

    #[test]
    fn unknown_attribute_names_do_not_parse() {
        let req = Requirement { name: "Luck".into(), amount: 5 };
        assert_eq!(req.attribute(), None);
    }
}
