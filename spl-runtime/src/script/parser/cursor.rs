//! # 游标
//!
//! 不可变的 token 游标。每个解析步骤接收一个游标，返回解析结果和新的游标，
//! 不共享可变位置。

use crate::error::ParseError;
use crate::script::tokenizer::SENTINEL;

/// token 序列上的只读位置
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    tokens: &'a [&'a str],
    /// 在完整 token 序列中的下标，用于错误信息
    offset: usize,
}

/// [`Cursor::take_until`] 的结果：(分隔符之前的 token, 分隔符, 分隔符之后的游标)
pub type Taken<'a> = (&'a [&'a str], &'a str, Cursor<'a>);

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [&'a str]) -> Self {
        Self { tokens, offset: 0 }
    }

    /// 向前看第 `n` 个 token，越界时返回哨兵
    pub fn peek(&self, n: usize) -> &'a str {
        self.tokens.get(n).copied().unwrap_or(SENTINEL)
    }

    /// 剩余 token 数（含哨兵）
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    /// 跳过 `n` 个 token
    pub fn advance(&self, n: usize) -> Self {
        let n = n.min(self.tokens.len());
        Self {
            tokens: &self.tokens[n..],
            offset: self.offset + n,
        }
    }

    /// 扫描到第一个满足 `is_delimiter` 的 token
    ///
    /// 遇到哨兵或序列末尾仍未找到时返回 [`ParseError::TokenExhausted`]。
    pub fn take_until(
        &self,
        expected: &'static str,
        is_delimiter: impl Fn(&str) -> bool,
    ) -> Result<Taken<'a>, ParseError> {
        for (index, token) in self.tokens.iter().enumerate() {
            if *token == SENTINEL {
                break;
            }
            if is_delimiter(token) {
                return Ok((&self.tokens[..index], *token, self.advance(index + 1)));
            }
        }
        Err(ParseError::TokenExhausted {
            expected,
            position: self.offset,
        })
    }
}

/// 把 token 拼回文本：单词以空格连接，分隔符紧贴末尾
pub fn join_with_delimiter(body: &[&str], delimiter: &str) -> String {
    format!("{}{}", body.join(" "), delimiter)
}
