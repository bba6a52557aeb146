//! # 椭圆柱模型
//!
//! 多分散平均的椭圆柱 SANS 模型。
//!
//! ## 求值流程
//! 1. 从当前参数构造一份 `EllipticalCylinderParameters`（background 置 0）
//! 2. 收集各分散参数的求积点，组成加权网格
//!    - 1D: r_minor → r_ratio → length
//!    - 2D: r_minor → length → r_ratio → θ → φ → ψ（θ 轴带立体角修正）
//! 3. 在网格上对核函数做加权平均
//! 4. 加回 background（background 不参与多分散）
//!
//! 网格点数是各分布点数之积。2D 时六个参数同时分散，开销按乘积增长。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/parameter.rs`、`sans/kernel.rs`、`sans/quadrature.rs`

use crate::error::{Result, SansError};
use crate::models::dispersion::Dispersion;
use crate::models::parameter::Parameter;
use crate::sans::kernel::{AnalyticKernel, EllipticalCylinderParameters, ScatteringKernel};
use crate::sans::quadrature::{Accumulation, AxisCorrection, GridAxis, WeightedGrid};

/// 模型参数名（显示顺序）
pub const PARAM_NAMES: [&str; 9] = [
    "scale",
    "r_minor",
    "r_ratio",
    "length",
    "contrast",
    "background",
    "cyl_theta",
    "cyl_phi",
    "cyl_psi",
];

/// 椭圆柱模型
#[derive(Debug, Clone)]
pub struct EllipticalCylinderModel<K = AnalyticKernel> {
    kernel: K,
    scale: Parameter,
    r_minor: Parameter,
    r_ratio: Parameter,
    length: Parameter,
    contrast: Parameter,
    background: Parameter,
    cyl_theta: Parameter,
    cyl_phi: Parameter,
    cyl_psi: Parameter,
}

impl EllipticalCylinderModel<AnalyticKernel> {
    /// 使用解析核函数和默认参数创建模型
    pub fn new() -> Self {
        Self::with_kernel(AnalyticKernel::default())
    }
}

impl Default for EllipticalCylinderModel<AnalyticKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ScatteringKernel> EllipticalCylinderModel<K> {
    /// 使用指定核函数和默认参数创建模型
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            scale: Parameter::new("scale", "", 1.0),
            r_minor: Parameter::dispersible("r_minor", "Å", 20.0).with_min(0.0),
            r_ratio: Parameter::dispersible("r_ratio", "", 1.5).with_min(0.0),
            length: Parameter::dispersible("length", "Å", 400.0).with_min(0.0),
            contrast: Parameter::new("contrast", "Å⁻²", 3.0e-6),
            background: Parameter::new("background", "cm⁻¹", 0.0),
            cyl_theta: Parameter::dispersible("cyl_theta", "rad", 1.57),
            cyl_phi: Parameter::dispersible("cyl_phi", "rad", 0.0),
            cyl_psi: Parameter::dispersible("cyl_psi", "rad", 0.0),
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// 所有参数（按 PARAM_NAMES 顺序）
    pub fn params(&self) -> [&Parameter; 9] {
        [
            &self.scale,
            &self.r_minor,
            &self.r_ratio,
            &self.length,
            &self.contrast,
            &self.background,
            &self.cyl_theta,
            &self.cyl_phi,
            &self.cyl_psi,
        ]
    }

    /// 按名称查找参数
    pub fn param(&self, name: &str) -> Result<&Parameter> {
        self.params()
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| unknown_parameter(name))
    }

    fn param_mut(&mut self, name: &str) -> Result<&mut Parameter> {
        match name {
            "scale" => Ok(&mut self.scale),
            "r_minor" => Ok(&mut self.r_minor),
            "r_ratio" => Ok(&mut self.r_ratio),
            "length" => Ok(&mut self.length),
            "contrast" => Ok(&mut self.contrast),
            "background" => Ok(&mut self.background),
            "cyl_theta" => Ok(&mut self.cyl_theta),
            "cyl_phi" => Ok(&mut self.cyl_phi),
            "cyl_psi" => Ok(&mut self.cyl_psi),
            _ => Err(unknown_parameter(name)),
        }
    }

    /// 设置参数值
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<()> {
        self.param_mut(name)?.set(value)
    }

    /// 设置参数分布
    pub fn set_dispersion(&mut self, name: &str, dispersion: Dispersion) -> Result<()> {
        self.param_mut(name)?.set_dispersion(dispersion)
    }

    /// 检查所有分布非空且总权重为正
    ///
    /// 求值函数本身不做检查，退化分布会得到 NaN 或无穷。
    pub fn validate(&self) -> Result<()> {
        self.params()
            .into_iter()
            .filter(|p| p.is_dispersible())
            .try_for_each(Parameter::validate)
    }

    /// 当前参数的结构体表示，background 槽位置 0
    fn kernel_parameters(&self) -> EllipticalCylinderParameters {
        EllipticalCylinderParameters {
            scale: self.scale.value(),
            r_minor: self.r_minor.value(),
            r_ratio: self.r_ratio.value(),
            length: self.length.value(),
            contrast: self.contrast.value(),
            background: 0.0,
            cyl_theta: self.cyl_theta.value(),
            cyl_phi: self.cyl_phi.value(),
            cyl_psi: self.cyl_psi.value(),
        }
    }

    /// 遍历 r_minor → r_ratio → length，权重按 r_minor·length·r_ratio 连乘
    fn grid_1d(&self) -> WeightedGrid {
        WeightedGrid::new()
            .axis(GridAxis::new(self.r_minor.get_weights()))
            .axis(GridAxis::new(self.r_ratio.get_weights()))
            .axis(GridAxis::new(self.length.get_weights()))
            .weight_order(&[0, 2, 1])
    }

    fn grid_2d(&self) -> WeightedGrid {
        WeightedGrid::new()
            .axis(GridAxis::new(self.r_minor.get_weights()))
            .axis(GridAxis::new(self.length.get_weights()))
            .axis(GridAxis::new(self.r_ratio.get_weights()))
            .axis(
                GridAxis::new(self.cyl_theta.get_weights())
                    .with_correction(AxisCorrection::SolidAngle),
            )
            .axis(GridAxis::new(self.cyl_phi.get_weights()))
            .axis(GridAxis::new(self.cyl_psi.get_weights()))
    }

    /// 1D 求值的网格点数
    pub fn grid_size_1d(&self) -> usize {
        self.grid_1d().size()
    }

    /// 2D 求值的网格点数
    pub fn grid_size_2d(&self) -> usize {
        self.grid_2d().size()
    }

    /// 1D 加权和与权重和（未加 background）
    pub fn accumulate_1d(&self, q: f64) -> Accumulation {
        let base = self.kernel_parameters();
        self.grid_1d().reduce(|v| {
            let pars = EllipticalCylinderParameters {
                r_minor: v[0],
                r_ratio: v[1],
                length: v[2],
                ..base
            };
            self.kernel.kernel_1d(&flat_arguments(&pars), q)
        })
    }

    /// 2D 加权和与权重和（未加 background，θ 修正已计入）
    pub fn accumulate_2d(&self, qx: f64, qy: f64) -> Accumulation {
        let base = self.kernel_parameters();
        self.grid_2d().reduce(|v| {
            let pars = EllipticalCylinderParameters {
                r_minor: v[0],
                length: v[1],
                r_ratio: v[2],
                cyl_theta: v[3],
                cyl_phi: v[4],
                cyl_psi: v[5],
                ..base
            };
            self.kernel.kernel_2d(&pars, qx, qy)
        })
    }

    /// 1D 散射强度 I(q)
    pub fn evaluate_1d(&self, q: f64) -> f64 {
        self.accumulate_1d(q).mean() + self.background.value()
    }

    /// 2D 散射强度 I(qx, qy)
    pub fn evaluate_2d(&self, qx: f64, qy: f64) -> f64 {
        self.accumulate_2d(qx, qy).mean() + self.background.value()
    }

    /// 极坐标形式 I(q, φ)
    pub fn evaluate_polar(&self, q: f64, phi: f64) -> f64 {
        let qx = q * phi.cos();
        let qy = q * phi.sin();
        self.evaluate_2d(qx, qy)
    }

    /// 有效半径
    ///
    /// 椭圆柱的有效半径尚无参考定义，始终返回 `NotImplemented`。
    pub fn effective_radius(&self) -> Result<f64> {
        Err(SansError::NotImplemented(
            "effective radius of the elliptical cylinder".to_string(),
        ))
    }
}

fn unknown_parameter(name: &str) -> SansError {
    SansError::UnknownParameter(format!("'{}' (expected one of: {})", name, PARAM_NAMES.join(", ")))
}

/// 结构体参数 → 1D 核函数的扁平数组
fn flat_arguments(pars: &EllipticalCylinderParameters) -> [f64; 6] {
    [
        pars.scale,
        pars.r_minor,
        pars.r_ratio,
        pars.length,
        pars.contrast,
        pars.background,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dispersion::{DispersionKind, WeightPoint};

    use std::cell::RefCell;
    use std::f64::consts::PI;

    /// 记录调用参数的简单核函数
    #[derive(Default)]
    struct RecordingKernel {
        calls_1d: RefCell<Vec<[f64; 6]>>,
        calls_2d: RefCell<Vec<EllipticalCylinderParameters>>,
    }

    impl ScatteringKernel for RecordingKernel {
        fn kernel_1d(&self, dp: &[f64; 6], q: f64) -> f64 {
            self.calls_1d.borrow_mut().push(*dp);
            dp[0] * (dp[1] * dp[1] + dp[2] * 10.0 + dp[3] / 100.0) * (1.0 + q)
        }

        fn kernel_2d(&self, pars: &EllipticalCylinderParameters, qx: f64, qy: f64) -> f64 {
            self.calls_2d.borrow_mut().push(*pars);
            pars.r_minor
                + 2.0 * pars.length
                + pars.r_ratio
                + pars.cyl_theta.cos().powi(2)
                + pars.cyl_phi.sin()
                + pars.cyl_psi
                + 3.0 * qx
                - qy
        }
    }

    fn array(pairs: &[(f64, f64)]) -> Dispersion {
        Dispersion::Array(pairs.iter().map(|&(v, w)| WeightPoint::new(v, w)).collect())
    }

    fn relative_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * a.abs().max(b.abs())
    }

    #[test]
    fn test_defaults() {
        let model = EllipticalCylinderModel::new();
        assert_eq!(model.param("r_minor").unwrap().value(), 20.0);
        assert_eq!(model.param("r_ratio").unwrap().value(), 1.5);
        assert_eq!(model.param("length").unwrap().value(), 400.0);
        assert_eq!(model.param("contrast").unwrap().value(), 3.0e-6);
        assert_eq!(model.param("cyl_theta").unwrap().value(), 1.57);
        assert_eq!(model.grid_size_1d(), 1);
        assert_eq!(model.grid_size_2d(), 1);
        assert!(model.param("radius").is_err());

        let names: Vec<&str> = model.params().iter().map(|p| p.name).collect();
        assert_eq!(names, PARAM_NAMES);
    }

    #[test]
    fn test_no_dispersion_reduces_to_single_kernel_call() {
        let mut model = EllipticalCylinderModel::new();
        model.set_param("background", 0.01).unwrap();
        let dp = [1.0, 20.0, 1.5, 400.0, 3.0e-6, 0.0];

        for q in [0.0, 0.001, 0.01, 0.1, 0.5] {
            let direct = model.kernel().kernel_1d(&dp, q) + 0.01;
            assert!(relative_eq(model.evaluate_1d(q), direct, 1e-14));
        }
    }

    #[test]
    fn test_kernel_receives_zeroed_background_slot() {
        let mut model = EllipticalCylinderModel::with_kernel(RecordingKernel::default());
        model.set_param("background", 5.0).unwrap();
        model
            .set_dispersion("length", array(&[(300.0, 1.0), (500.0, 1.0)]))
            .unwrap();

        model.evaluate_1d(0.02);
        let calls = model.kernel().calls_1d.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], [1.0, 20.0, 1.5, 300.0, 3.0e-6, 0.0]);
        assert_eq!(calls[1], [1.0, 20.0, 1.5, 500.0, 3.0e-6, 0.0]);

        model.evaluate_2d(0.01, 0.02);
        assert!(model
            .kernel()
            .calls_2d
            .borrow()
            .iter()
            .all(|p| p.background == 0.0));
    }

    #[test]
    fn test_1d_weights_multiply_radius_length_ratio() {
        let mut model = EllipticalCylinderModel::with_kernel(RecordingKernel::default());
        model.set_dispersion("r_minor", array(&[(20.0, 0.255)])).unwrap();
        model.set_dispersion("r_ratio", array(&[(1.5, 0.495)])).unwrap();
        model.set_dispersion("length", array(&[(400.0, 0.449)])).unwrap();

        let acc = model.accumulate_1d(0.01);
        assert_eq!(acc.norm.to_bits(), (0.255_f64 * 0.449 * 0.495).to_bits());
        assert_ne!(acc.norm.to_bits(), (0.255_f64 * 0.495 * 0.449).to_bits());
    }

    #[test]
    fn test_2d_without_dispersion_is_single_kernel_call_plus_background() {
        let mut model = EllipticalCylinderModel::new();
        model.set_param("background", 0.3).unwrap();
        let nominal = EllipticalCylinderParameters {
            scale: 1.0,
            r_minor: 20.0,
            r_ratio: 1.5,
            length: 400.0,
            contrast: 3.0e-6,
            background: 0.0,
            cyl_theta: 1.57,
            cyl_phi: 0.0,
            cyl_psi: 0.0,
        };

        let points = [(0.0, 0.0), (0.01, 0.02), (-0.05, 0.003), (0.1, -0.1)];
        for (qx, qy) in points {
            let direct = model.kernel().kernel_2d(&nominal, qx, qy) + 0.3;
            assert_eq!(model.evaluate_2d(qx, qy), direct);
        }

        // 单点数组分布与不分散等价
        model.set_dispersion("r_minor", array(&[(20.0, 0.7)])).unwrap();
        model.set_dispersion("cyl_theta", array(&[(1.57, 2.0)])).unwrap();
        model.set_dispersion("cyl_psi", array(&[(0.0, 0.3)])).unwrap();
        for (qx, qy) in points {
            let direct = model.kernel().kernel_2d(&nominal, qx, qy) + 0.3;
            assert!(relative_eq(model.evaluate_2d(qx, qy), direct, 1e-14));
        }
    }

    #[test]
    fn test_radius_dispersion_is_weighted_average() {
        let mut model = EllipticalCylinderModel::new();
        model
            .set_dispersion("r_minor", array(&[(18.0, 0.25), (20.0, 0.5), (22.0, 0.25)]))
            .unwrap();

        let q = 0.01;
        let call = |r: f64| model.kernel().kernel_1d(&[1.0, r, 1.5, 400.0, 3.0e-6, 0.0], q);
        let expected = (0.25 * call(18.0) + 0.5 * call(20.0) + 0.25 * call(22.0)) / 1.0;

        assert!(relative_eq(model.evaluate_1d(q), expected, 1e-14));
        assert_eq!(model.grid_size_1d(), 3);
    }

    #[test]
    fn test_norm_is_product_of_weight_sums() {
        let mut model = EllipticalCylinderModel::with_kernel(RecordingKernel::default());
        model
            .set_dispersion("r_minor", array(&[(18.0, 0.5), (22.0, 1.5)]))
            .unwrap();
        model
            .set_dispersion("r_ratio", array(&[(1.2, 0.3), (1.5, 0.3), (1.8, 0.4)]))
            .unwrap();
        model
            .set_dispersion("length", array(&[(380.0, 2.0), (420.0, 3.0)]))
            .unwrap();
        model
            .set_dispersion("cyl_phi", array(&[(0.0, 0.7), (0.5, 0.3)]))
            .unwrap();

        let acc = model.accumulate_1d(0.03);
        assert!(relative_eq(acc.norm, 2.0 * 1.0 * 5.0, 1e-14));

        // θ 单点，无修正
        let acc = model.accumulate_2d(0.01, 0.0);
        assert!(relative_eq(acc.norm, 2.0 * 1.0 * 5.0 * 1.0 * 1.0 * 1.0, 1e-14));
        assert_eq!(model.grid_size_2d(), 2 * 3 * 2 * 2);
    }

    #[test]
    fn test_background_is_additive() {
        let mut model = EllipticalCylinderModel::new();
        model
            .set_dispersion("r_minor", Dispersion::from_spec("gaussian(2.0, 7, 2)").unwrap())
            .unwrap();

        for q in [0.005, 0.05, 0.2] {
            model.set_param("background", 0.0).unwrap();
            let base = model.evaluate_1d(q);
            model.set_param("background", 0.125).unwrap();
            let shifted = model.evaluate_1d(q);
            assert!((shifted - base - 0.125).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_theta_has_no_sine_correction() {
        let mut model = EllipticalCylinderModel::with_kernel(RecordingKernel::default());
        model.set_param("cyl_theta", 0.4).unwrap();
        model
            .set_dispersion("cyl_phi", array(&[(0.0, 1.0), (1.0, 3.0)]))
            .unwrap();

        let (qx, qy) = (0.02, 0.01);
        let point = |phi: f64| {
            20.0 + 800.0 + 1.5 + 0.4_f64.cos().powi(2) + phi.sin() + 0.0 + 3.0 * qx - qy
        };
        let expected = (1.0 * point(0.0) + 3.0 * point(1.0)) / 4.0;

        assert!(relative_eq(model.evaluate_2d(qx, qy), expected, 1e-14));
    }

    #[test]
    fn test_multi_theta_applies_solid_angle_weighting() {
        let mut model = EllipticalCylinderModel::with_kernel(RecordingKernel::default());
        model
            .set_dispersion("cyl_theta", array(&[(0.5, 1.0), (1.2, 2.0)]))
            .unwrap();

        let (qx, qy) = (0.01, 0.0);
        let point = |theta: f64| 20.0 + 800.0 + 1.5 + theta.cos().powi(2) + 0.0 + 0.0 + 3.0 * qx - qy;
        let sum = 1.0 * point(0.5) * 0.5_f64.sin() + 2.0 * point(1.2) * 1.2_f64.sin();
        let norm = 3.0 / 1.0_f64.asin();

        let acc = model.accumulate_2d(qx, qy);
        assert!(relative_eq(acc.sum, sum, 1e-14));
        assert!(relative_eq(acc.norm, norm, 1e-14));
        assert!(relative_eq(model.evaluate_2d(qx, qy), sum / norm, 1e-14));
    }

    #[test]
    fn test_polar_matches_cartesian() {
        let mut model = EllipticalCylinderModel::new();
        model.set_param("cyl_theta", 1.0).unwrap();
        model.set_param("cyl_phi", 0.3).unwrap();
        model
            .set_dispersion("cyl_psi", Dispersion::from_spec("gaussian(0.1, 5, 2)").unwrap())
            .unwrap();

        for (q, phi) in [(0.02, 0.0), (0.05, PI / 2.0), (0.1, PI), (0.03, 1.1)] {
            let polar = model.evaluate_polar(q, phi);
            let cartesian = model.evaluate_2d(q * phi.cos(), q * phi.sin());
            assert_eq!(polar, cartesian);
        }
    }

    #[test]
    fn test_loop_order_does_not_change_result() {
        // 2D 网格轴顺序与 1D 不同；θ/φ/ψ 固定时两者应给出同一加权平均
        let mut model = EllipticalCylinderModel::with_kernel(RecordingKernel::default());
        model
            .set_dispersion("r_minor", array(&[(18.0, 0.25), (20.0, 0.5), (22.0, 0.25)]))
            .unwrap();
        model
            .set_dispersion("r_ratio", array(&[(1.2, 1.0), (1.6, 2.0)]))
            .unwrap();
        model
            .set_dispersion("length", array(&[(350.0, 1.0), (450.0, 1.0)]))
            .unwrap();

        let mut expected_sum = 0.0;
        let mut expected_norm = 0.0;
        for &(l, wl) in &[(350.0, 1.0), (450.0, 1.0)] {
            for &(n, wn) in &[(1.2, 1.0), (1.6, 2.0)] {
                for &(r, wr) in &[(18.0, 0.25), (20.0, 0.5), (22.0, 0.25)] {
                    let w = wl * wn * wr;
                    expected_sum += w * (r + 2.0 * l + n + 1.57_f64.cos().powi(2) + 0.06);
                    expected_norm += w;
                }
            }
        }

        let value = model.evaluate_2d(0.02, 0.0);
        assert!(relative_eq(value, expected_sum / expected_norm, 1e-13));
    }

    #[test]
    fn test_effective_radius_not_implemented() {
        let model = EllipticalCylinderModel::new();
        assert!(matches!(
            model.effective_radius(),
            Err(SansError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_validate_and_configuration_errors() {
        let mut model = EllipticalCylinderModel::new();
        assert!(model.validate().is_ok());
        assert!(model.set_param("r_minor", -1.0).is_err());
        assert!(model.set_param("nope", 1.0).is_err());
        assert!(model
            .set_dispersion("contrast", Dispersion::parametric(DispersionKind::Gaussian, 1.0))
            .is_err());

        model
            .set_dispersion("length", array(&[(-10.0, 1.0)]))
            .unwrap();
        assert!(model.validate().is_err());
        assert!(model.evaluate_1d(0.01).is_nan());
    }
}
