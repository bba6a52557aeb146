//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `iq`: 1D 散射曲线 I(q)
//! - `iqxy`: 2D 散射强度 I(qx, qy) 或固定 q 的方位角扫描
//! - `batch`: 在一批实验数据文件的 q 点上计算模型
//! - `info`: 显示模型参数与求积网格规模
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: model, iq, iqxy, batch

pub mod batch;
pub mod iq;
pub mod iqxy;
pub mod model;

use clap::{Args, Parser, Subcommand};

/// sansmodel - 多分散椭圆柱 SANS 模型计算
#[derive(Parser)]
#[command(name = "sansmodel")]
#[command(version)]
#[command(
    about = "Polydisperse elliptical-cylinder small-angle neutron scattering model",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the orientation-averaged 1D intensity I(q)
    Iq(iq::IqArgs),

    /// Compute the oriented 2D intensity I(qx, qy)
    Iqxy(iqxy::IqxyArgs),

    /// Evaluate the model on the q points of every data file in a directory
    Batch(batch::BatchArgs),

    /// Show model parameters, dispersions and quadrature grid sizes
    Info(InfoArgs),
}

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub model: model::ModelArgs,
}
