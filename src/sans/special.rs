//! # 特殊函数
//!
//! 形状因子核函数所需的特殊函数。
//!
//! ## 公式
//! - J1(x): 一阶第一类 Bessel 函数，|x| < 8 用有理逼近，其余用渐近展开
//!   (Numerical Recipes `bessj1` 系数)
//! - sinc(x) = sin(x)/x
//!
//! ## 依赖关系
//! - 被 `sans/kernel.rs` 调用
//! - 纯数值函数，无外部依赖

/// 一阶第一类 Bessel 函数 J1(x)
pub fn bessel_j1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = x
            * (72362614232.0
                + y * (-7895059235.0
                    + y * (242396853.1
                        + y * (-2972611.439 + y * (15704.48260 + y * (-30.16036606))))));
        let den = 144725228442.0
            + y * (2300535178.0
                + y * (18583304.74 + y * (99447.43394 + y * (376.9991397 + y * 1.0))));
        num / den
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 2.356194491;
        let p = 1.0
            + y * (0.183105e-2
                + y * (-0.3516396496e-4 + y * (0.2457520174e-5 + y * (-0.240337019e-6))));
        let q = 0.04687499995
            + y * (-0.2002690873e-3
                + y * (0.8449199096e-5 + y * (-0.88228987e-6 + y * 0.105787412e-6)));
        let ans = (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q);
        if x < 0.0 {
            -ans
        } else {
            ans
        }
    }
}

/// 圆截面振幅 2·J1(x)/x，x → 0 时取极限 1
pub fn bessel_amplitude(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        1.0
    } else {
        2.0 * bessel_j1(x) / x
    }
}

/// sin(x)/x，x → 0 时取极限 1
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        1.0
    } else {
        x.sin() / x
    }
}
