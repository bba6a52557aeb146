//! # 数值积分
//!
//! 多分散平均所用的加权网格归约，以及核函数取向平均所用的
//! Gauss-Legendre 求积。
//!
//! ## 算法概述
//! 1. 每个分散参数是一条轴，轴上是有序的 (value, weight) 点列
//! 2. 按行优先顺序遍历所有轴的笛卡尔积（第一条轴在最外层）
//! 3. 每个网格点贡献 Π(weights)·f(point) 到分子、Π(weights) 到分母
//! 4. 立体角轴（极角 θ）额外乘 sin(θ)，最后分母除以 asin(1)
//!
//! 网格大小是各轴点数之积，六维时开销增长很快，由调用方控制。
//!
//! ## 依赖关系
//! - 被 `models/elliptical_cylinder.rs` 和 `sans/kernel.rs` 调用
//! - 使用 `models/dispersion.rs` 的 WeightPoint

use crate::models::WeightPoint;

use std::f64::consts::PI;

/// 轴修正方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisCorrection {
    /// 无修正
    #[default]
    None,
    /// 球面极角平均：每点乘 sin(value)，归一化因子除以 asin(1)
    SolidAngle,
}

impl AxisCorrection {
    /// 单点贡献的修正因子（不进入权重和）
    fn point_factor(self, value: f64) -> f64 {
        match self {
            AxisCorrection::None => 1.0,
            AxisCorrection::SolidAngle => value.sin(),
        }
    }

    /// 归约结束后归一化因子的除数
    fn norm_divisor(self) -> f64 {
        match self {
            AxisCorrection::None => 1.0,
            AxisCorrection::SolidAngle => 1.0_f64.asin(),
        }
    }
}

/// 网格的一条轴
#[derive(Debug, Clone)]
pub struct GridAxis {
    points: Vec<WeightPoint>,
    correction: AxisCorrection,
}

impl GridAxis {
    /// 创建无修正的轴
    pub fn new(points: Vec<WeightPoint>) -> Self {
        Self {
            points,
            correction: AxisCorrection::None,
        }
    }

    /// 设置轴修正
    pub fn with_correction(mut self, correction: AxisCorrection) -> Self {
        self.correction = correction;
        self
    }

    /// 轴上的点数
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 单点轴视为固定值，不做修正
    fn active_correction(&self) -> AxisCorrection {
        if self.points.len() > 1 {
            self.correction
        } else {
            AxisCorrection::None
        }
    }
}

/// 归约结果：加权和与权重和
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulation {
    pub sum: f64,
    pub norm: f64,
}

impl Accumulation {
    /// 加权平均 sum / norm（norm 为 0 时结果为 NaN 或无穷）
    pub fn mean(&self) -> f64 {
        self.sum / self.norm
    }
}

/// N 维加权网格
#[derive(Debug, Clone, Default)]
pub struct WeightedGrid {
    axes: Vec<GridAxis>,
    /// 权重连乘的轴顺序，空表示与轴顺序相同
    weight_order: Vec<usize>,
}

impl WeightedGrid {
    /// 创建空网格（零条轴时只有一个网格点）
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条轴，追加顺序即循环嵌套顺序
    pub fn axis(mut self, axis: GridAxis) -> Self {
        self.axes.push(axis);
        self
    }

    /// 指定权重连乘的轴顺序（不改变遍历顺序）
    ///
    /// 只影响浮点舍入。`order` 不是全部轴的排列时按轴顺序连乘。
    pub fn weight_order(mut self, order: &[usize]) -> Self {
        self.weight_order = order.to_vec();
        self
    }

    fn product_order(&self) -> Vec<usize> {
        let n = self.axes.len();
        let mut sorted = self.weight_order.clone();
        sorted.sort_unstable();
        if sorted.iter().copied().eq(0..n) {
            self.weight_order.clone()
        } else {
            (0..n).collect()
        }
    }

    /// 网格点总数
    pub fn size(&self) -> usize {
        self.axes.iter().map(GridAxis::len).product()
    }

    /// 在整个网格上归约
    ///
    /// `f` 接收当前网格点的取值（按轴顺序），返回该点的被积函数值。
    pub fn reduce<F>(&self, mut f: F) -> Accumulation
    where
        F: FnMut(&[f64]) -> f64,
    {
        let mut acc = Accumulation::default();

        if self.axes.iter().any(|a| a.points.is_empty()) {
            return acc;
        }

        let order = self.product_order();
        let corrections: Vec<AxisCorrection> =
            self.axes.iter().map(GridAxis::active_correction).collect();
        let mut index = vec![0usize; self.axes.len()];
        let mut values: Vec<f64> = self.axes.iter().map(|a| a.points[0].value).collect();

        'grid: loop {
            let mut weight = 1.0;
            for &d in &order {
                weight *= self.axes[d].points[index[d]].weight;
            }
            let mut factor = 1.0;
            for (d, axis) in self.axes.iter().enumerate() {
                factor *= corrections[d].point_factor(axis.points[index[d]].value);
            }

            acc.sum += weight * f(&values) * factor;
            acc.norm += weight;

            // 里程表式进位，最后一条轴变化最快
            let mut d = self.axes.len();
            loop {
                if d == 0 {
                    break 'grid;
                }
                d -= 1;
                index[d] += 1;
                if index[d] < self.axes[d].points.len() {
                    values[d] = self.axes[d].points[index[d]].value;
                    break;
                }
                index[d] = 0;
                values[d] = self.axes[d].points[0].value;
            }
        }

        for correction in corrections {
            acc.norm /= correction.norm_divisor();
        }

        acc
    }
}

/// Gauss-Legendre 求积规则（区间 [-1, 1]）
#[derive(Debug, Clone)]
pub struct GaussLegendre {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussLegendre {
    /// 用 Newton 迭代求 n 阶 Legendre 多项式的零点
    pub fn new(n: usize) -> Self {
        let n = n.max(1);
        let mut nodes = vec![0.0; n];
        let mut weights = vec![0.0; n];
        let nf = n as f64;

        for i in 0..n.div_ceil(2) {
            let mut z = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
            let mut pp = 1.0;

            for _ in 0..100 {
                let mut p1 = 1.0;
                let mut p2 = 0.0;
                for j in 0..n {
                    let p3 = p2;
                    p2 = p1;
                    let jf = j as f64;
                    p1 = ((2.0 * jf + 1.0) * z * p2 - jf * p3) / (jf + 1.0);
                }
                pp = nf * (z * p1 - p2) / (z * z - 1.0);
                let z1 = z;
                z = z1 - p1 / pp;
                if (z - z1).abs() < 1e-15 {
                    break;
                }
            }

            nodes[i] = -z;
            nodes[n - 1 - i] = z;
            let w = 2.0 / ((1.0 - z * z) * pp * pp);
            weights[i] = w;
            weights[n - 1 - i] = w;
        }

        Self { nodes, weights }
    }

    /// 求积点数
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// 在 [a, b] 上积分
    pub fn integrate<F>(&self, a: f64, b: f64, mut f: F) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        let half = (b - a) / 2.0;
        let mid = (b + a) / 2.0;
        let sum: f64 = self
            .nodes
            .iter()
            .zip(&self.weights)
            .map(|(x, w)| w * f(half * x + mid))
            .sum();
        half * sum
    }
}
