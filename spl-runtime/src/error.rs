//! # Error 模块
//!
//! 定义 spl-runtime 中使用的错误类型。

use thiserror::Error;

/// 解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 在找到必需的分隔符之前 token 已耗尽
    #[error("第 {position} 个 token 起：直到输入结束都没有找到 {expected}")]
    TokenExhausted {
        expected: &'static str,
        position: usize,
    },

    /// 结构之外的多余 token
    #[error("第 {position} 个 token：意外的 '{token}'")]
    UnexpectedToken { token: String, position: usize },

    /// 不支持的罗马数字（非致命，按 0 处理）
    #[error("第 {position} 个 token：不支持的罗马数字 '{numeral}'，按 0 处理")]
    UnsupportedNumeral { numeral: String, position: usize },
}

/// 名词短语求值错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// 除数为零
    #[error("除数为零")]
    DivisionByZero,

    /// 对负数开平方
    #[error("无法对负数 {value} 开平方")]
    NegativeRoot { value: i64 },

    /// 角色不存在
    #[error("角色 '{name}' 不在演员表中")]
    UnknownCharacter { name: String },
}

/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 舞台指示或对白引用了未声明的角色
    #[error("角色 '{name}' 不在演员表中")]
    UnknownCharacter { name: String },

    /// 台上除说话者外有多个角色
    #[error("{speaker} 的对白对象不唯一：{}", candidates.join(", "))]
    AmbiguousAddressee {
        speaker: String,
        candidates: Vec<String>,
    },

    /// 台上除说话者外没有其他角色
    #[error("{speaker} 的对白没有对象：台上没有其他角色")]
    MissingAddressee { speaker: String },

    /// 表达式求值失败
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// 栈中只剩当前值时无法弹出
    #[error("角色 '{name}' 的栈已到底，无法 recall")]
    StackUnderflow { name: String },

    /// 跳转目标不存在
    #[error("跳转目标 {target} 不存在")]
    InvalidJumpTarget { target: String },

    /// 输入读取失败
    #[error("读取输入失败: {message}")]
    InvalidInput { message: String },
}

/// 关键字词典加载错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeywordError {
    /// 值不是整数
    #[error("{source_name}: 单词 '{word}' 的值 '{value}' 不是整数")]
    InvalidValue {
        source_name: String,
        word: String,
        value: String,
    },

    /// 未知运算名
    #[error("未知运算 '{word}'")]
    UnknownOperation { word: String },

    /// 运算元数与内置定义不符
    #[error("运算 '{word}' 的元数应为 {expected}，词典中为 {actual}")]
    ArityMismatch {
        word: String,
        expected: usize,
        actual: i64,
    },
}

/// spl-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplError {
    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),

    /// 运行时错误
    #[error("运行时错误: {0}")]
    Runtime(#[from] RuntimeError),

    /// 词典错误
    #[error("词典错误: {0}")]
    Keyword(#[from] KeywordError),
}

/// Result 类型别名
pub type SplResult<T> = Result<T, SplError>;
