//! # Parser 模块
//!
//! 剧本解析器实现（手写递归下降）。
//!
//! ## 架构
//!
//! ```text
//! 原始文本 → [分词] → Vec<&str> → [结构解析 + 句子分类] → Program
//! ```
//!
//! ## 设计原则
//!
//! - 每个解析步骤接收不可变游标，返回结果与新游标
//! - 缺少必需分隔符时返回 `TokenExhausted`，而不是越界
//! - 不支持的罗马数字只记录警告，按 0 处理
//!
//! ## 模块结构
//!
//! - `cursor`: 不可变 token 游标
//! - `structure`: Program/Act/Scene/Line 的递归下降
//! - `sentence`: 句子分类与解析

mod cursor;
mod sentence;
mod structure;


use crate::error::ParseError;
use crate::keywords::Keywords;
use crate::script::ast::Program;
use crate::script::tokenizer::tokenize;

use cursor::Cursor;
use structure::StructureParser;

/// 剧本解析器
pub struct Parser<'k> {
    structure: StructureParser<'k>,
}

impl<'k> Parser<'k> {
    /// 创建新的解析器
    ///
    /// 句子分类依赖 `keywords`。
    pub fn new(keywords: &'k Keywords) -> Self {
        Self {
            structure: StructureParser::new(keywords),
        }
    }

    /// 解析剧本文本
    pub fn parse(&mut self, text: &str) -> Result<Program, ParseError> {
        self.structure.warnings.clear();

        let tokens = tokenize(text);
        let (program, _) = self.structure.parse_program(Cursor::new(&tokens))?;
        Ok(program)
    }

    /// 获取解析过程中的警告
    pub fn warnings(&self) -> &[ParseError] {
        &self.structure.warnings
    }
}
