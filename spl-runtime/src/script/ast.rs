//! # AST 模块
//!
//! 定义剧本的抽象语法树。
//!
//! ## 设计说明
//!
//! AST 是解析器的输出，解析后不再修改。
//! 执行期可变的部分（角色的栈、在台状态、输出）在 [`crate::state`] 中。

use serde::{Deserialize, Serialize};

use crate::keywords::IoMode;

/// 罗马数字
///
/// 只支持 I 到 X，其他写法的值为 0。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roman {
    /// 原文
    pub text: String,
    /// 数值（不支持时为 0）
    pub value: usize,
}

impl Roman {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = roman_value(&text);
        Self { text, value }
    }

    /// 是否在支持范围内
    pub fn is_supported(&self) -> bool {
        self.value != 0
    }
}

/// 罗马数字查表
pub fn roman_value(text: &str) -> usize {
    match text {
        "I" => 1,
        "II" => 2,
        "III" => 3,
        "IV" => 4,
        "V" => 5,
        "VI" => 6,
        "VII" => 7,
        "VIII" => 8,
        "IX" => 9,
        "X" => 10,
        _ => 0,
    }
}

/// 演员表中的角色声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub description: String,
}

/// 整部剧本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// 标题（含终结符）
    pub title: String,
    /// 演员表（按出现顺序）
    pub characters: Vec<Character>,
    pub acts: Vec<Act>,
}

impl Program {
    /// 按名字查找角色声明
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// 序列化为格式化 JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// 幕
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Act {
    pub number: Roman,
    pub description: String,
    pub scenes: Vec<Scene>,
}

/// 场
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub number: Roman,
    pub description: String,
    pub lines: Vec<Line>,
}

/// 舞台指示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageAction {
    /// `[Enter ...]`
    Enter,
    /// `[Exit ...]`
    Exit,
    /// `[Exeunt ...]`
    Exeunt,
}

impl StageAction {
    /// 由开括号 token 识别舞台指示
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "[Enter" => Some(Self::Enter),
            "[Exit" => Some(Self::Exit),
            "[Exeunt" => Some(Self::Exeunt),
            _ => None,
        }
    }
}

/// 一行：舞台指示或对白
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Line {
    /// 舞台指示
    StageDirection {
        action: StageAction,
        /// 涉及的角色（已去掉 `and`）
        names: Vec<String>,
    },

    /// 对白
    Dialogue {
        /// 说话者
        speaker: String,
        sentences: Vec<Sentence>,
    },
}

/// 句子终结符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminator {
    Period,
    Semicolon,
    Exclamation,
    Question,
}

impl Terminator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "." => Some(Self::Period),
            ";" => Some(Self::Semicolon),
            "!" => Some(Self::Exclamation),
            "?" => Some(Self::Question),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Period => ".",
            Self::Semicolon => ";",
            Self::Exclamation => "!",
            Self::Question => "?",
        }
    }
}

/// 所有句子共有的部分：单词序列与终结符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub words: Vec<String>,
    pub terminator: Terminator,
}

impl Clause {
    pub fn new<S: Into<String>>(
        words: impl IntoIterator<Item = S>,
        terminator: Terminator,
    ) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            terminator,
        }
    }

    /// 还原为文本，例如 `Speak your mind!`
    pub fn text(&self) -> String {
        format!("{}{}", self.words.join(" "), self.terminator.as_str())
    }
}

/// 跳转目标（幕/场序号，从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpTarget {
    Act(usize),
    Scene(usize),
}

impl std::fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JumpTarget::Act(n) => write!(f, "act {}", n),
            JumpTarget::Scene(n) => write!(f, "scene {}", n),
        }
    }
}

/// 句子
///
/// 分类在解析时完成，执行时只需穷举匹配。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sentence {
    /// 普通陈述，无效果
    Plain(Clause),

    /// 赋值：对白对象的当前值 := 短语的值
    Assignment(Clause),

    /// 输出对白对象的值
    Output { clause: Clause, mode: IoMode },

    /// 为对白对象读入一个值
    Input { clause: Clause, mode: IoMode },

    /// 跳转（`Let us proceed to scene II.`）
    Goto {
        clause: Clause,
        /// 未找到 `act`/`scene` + 罗马数字时为 None
        target: Option<JumpTarget>,
    },

    /// 条件句
    Conditional(Clause),

    /// 入栈（`Remember me.`）
    Push(Clause),

    /// 出栈（`Recall your past.`）
    Pop(Clause),

    /// 问句（终结符为 `?` 的任意句子）
    Query(Clause),
}

impl Sentence {
    /// 共有部分
    pub fn clause(&self) -> &Clause {
        match self {
            Sentence::Plain(clause)
            | Sentence::Assignment(clause)
            | Sentence::Conditional(clause)
            | Sentence::Push(clause)
            | Sentence::Pop(clause)
            | Sentence::Query(clause) => clause,
            Sentence::Output { clause, .. }
            | Sentence::Input { clause, .. }
            | Sentence::Goto { clause, .. } => clause,
        }
    }

    /// 类型名，用于日志
    pub fn kind(&self) -> &'static str {
        match self {
            Sentence::Plain(_) => "plain",
            Sentence::Assignment(_) => "assignment",
            Sentence::Output { .. } => "output",
            Sentence::Input { .. } => "input",
            Sentence::Goto { .. } => "goto",
            Sentence::Conditional(_) => "conditional",
            Sentence::Push(_) => "push",
            Sentence::Pop(_) => "pop",
            Sentence::Query(_) => "query",
        }
    }

    /// 终结符为 `?` 时重新标记为问句
    pub fn into_query_if_question(self) -> Self {
        if self.clause().terminator != Terminator::Question {
            return self;
        }
        match self {
            Sentence::Plain(clause)
            | Sentence::Assignment(clause)
            | Sentence::Conditional(clause)
            | Sentence::Push(clause)
            | Sentence::Pop(clause)
            | Sentence::Query(clause) => Sentence::Query(clause),
            Sentence::Output { clause, .. }
            | Sentence::Input { clause, .. }
            | Sentence::Goto { clause, .. } => Sentence::Query(clause),
        }
    }
}
