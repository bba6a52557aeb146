//! # sansmodel - 多分散椭圆柱 SANS 模型
//!
//! 计算椭圆截面柱体的小角中子散射强度，支持对半径、轴比、长度和取向角
//! 做多分散平均。
//!
//! ## 子命令
//! - `iq`    - 取向平均的 1D 强度 I(q)
//! - `iqxy`  - 固定取向的 2D 强度 I(qx, qy)
//! - `batch` - 在实验数据文件的 q 点上批量计算
//! - `info`  - 参数表与求积网格规模
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (数据、点列与参数文件)
//!   │     ├── models/    (参数、分布与椭圆柱模型)
//!   │     ├── sans/      (核函数、求积、绘图与导出)
//!   │     └── batch/     (文件收集与并行执行)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod sans;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
