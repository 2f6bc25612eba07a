//! 评分细则
//!
//! 以 JSON 对象存储（`{"Content Quality": 2, "Style": 1}`），
//! 反序列化时保留标准的书写顺序，评分理由按该顺序输出。

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 单条评分标准
#[derive(Debug, Clone, PartialEq)]
pub struct RubricCriterion {
    pub name: String,
    pub weight: f64,
}

/// 有序的评分标准集合，权重无需归一化
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rubric {
    criteria: Vec<RubricCriterion>,
}

impl Rubric {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加标准；同名标准覆盖原有权重，位置不变
    pub fn with_criterion<S: Into<String>>(mut self, name: S, weight: f64) -> Self {
        self.insert(name, weight);
        self
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, weight: f64) {
        let name = name.into();
        match self.criteria.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.weight = weight,
            None => self.criteria.push(RubricCriterion { name, weight }),
        }
    }

    pub fn criteria(&self) -> &[RubricCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// 权重必须是非负有限数，否则无法从 JSON 读回
    pub fn validate(&self) -> Result<(), String> {
        match self
            .criteria
            .iter()
            .find(|c| !c.weight.is_finite() || c.weight < 0.0)
        {
            Some(c) => Err(invalid_weight_message(&c.name, c.weight)),
            None => Ok(()),
        }
    }
}

fn invalid_weight_message(name: &str, weight: f64) -> String {
    format!("无效的评分权重: '{name}' = {weight}")
}

impl<S: Into<String>> FromIterator<(S, f64)> for Rubric {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut rubric = Rubric::new();
        for (name, weight) in iter {
            rubric.insert(name, weight);
        }
        rubric
    }
}

impl Serialize for Rubric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.criteria.len()))?;
        for criterion in &self.criteria {
            map.serialize_entry(&criterion.name, &criterion.weight)?;
        }
        map.end()
    }
}

struct RubricVisitor;

impl<'de> Visitor<'de> for RubricVisitor {
    type Value = Rubric;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from criterion name to numeric weight")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut rubric = Rubric::new();
        while let Some((name, weight)) = access.next_entry::<String, f64>()? {
            if !weight.is_finite() || weight < 0.0 {
                return Err(serde::de::Error::custom(invalid_weight_message(
                    &name, weight,
                )));
            }
            rubric.insert(name, weight);
        }
        Ok(rubric)
    }
}

impl<'de> Deserialize<'de> for Rubric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RubricVisitor)
    }
}
