//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `models/`, `sans/`, `batch/`, `utils/`
//! - 子模块: setup, iq, iqxy, batch, info

pub mod batch;
pub mod info;
pub mod iq;
pub mod iqxy;
pub mod setup;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Iq(args) => iq::execute(args),
        Commands::Iqxy(args) => iqxy::execute(args),
        Commands::Batch(args) => batch::execute(args),
        Commands::Info(args) => info::execute(args),
    }
}
