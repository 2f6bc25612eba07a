/// 定长稠密向量
///
/// 由 `EmbeddingService` 产出时已经单位化，但比较时不依赖这一点。
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// L2 范数
    pub fn norm(&self) -> f64 {
        self.0
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt()
    }

    /// 单位化；零向量保持不变
    pub fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for x in self.0.iter_mut() {
                *x = (f64::from(*x) / norm) as f32;
            }
        }
        self
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}
