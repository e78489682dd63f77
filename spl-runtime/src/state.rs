//! # State 模块
//!
//! 定义解释器的运行时状态。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**，通过参数传递
//! - 所有状态必须**可序列化**，便于调试时导出
//! - 不允许隐式全局状态
//!
//! AST 解析后不可变；角色的栈、在台状态和输出都放在这里。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::script::ast::{JumpTarget, Program};
use crate::script::expr::EvalContext;

/// 控制流状态
///
/// 幕、场编号从 1 开始，按在 AST 中的位置计数，与原文的罗马数字无关。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// 当前幕
    pub act: usize,
    /// 当前场
    pub scene: usize,
    /// 尚未被外层循环处理的跳转
    pub pending_jump: Option<JumpTarget>,
    /// 当前对白对象的编号（台上恰有一个其他角色时才有值）
    pub target: Option<usize>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            act: 1,
            scene: 1,
            pending_jump: None,
            target: None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// 角色的运行时状态
///
/// 栈顶即当前值，栈永远非空；反序列化时拒绝空栈。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRole")]
pub struct Role {
    /// 编号（从 1 开始，按演员表顺序）
    id: usize,
    stack: Vec<i64>,
    on_stage: bool,
}

/// 反序列化的中间形式
#[derive(Deserialize)]
struct RawRole {
    id: usize,
    stack: Vec<i64>,
    on_stage: bool,
}

impl TryFrom<RawRole> for Role {
    type Error = String;

    fn try_from(raw: RawRole) -> Result<Self, Self::Error> {
        if raw.stack.is_empty() {
            return Err(format!("角色 #{} 的栈为空", raw.id));
        }
        Ok(Self {
            id: raw.id,
            stack: raw.stack,
            on_stage: raw.on_stage,
        })
    }
}

impl Role {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            stack: vec![0],
            on_stage: false,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// 当前值（栈顶）
    pub fn value(&self) -> i64 {
        self.stack[self.stack.len() - 1]
    }

    /// 覆盖栈顶
    pub fn set_value(&mut self, value: i64) {
        let top = self.stack.len() - 1;
        self.stack[top] = value;
    }

    pub fn push(&mut self, value: i64) {
        self.stack.push(value);
    }

    /// 弹出栈顶；只剩一个值时返回 None 且不修改栈
    pub fn pop(&mut self) -> Option<i64> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    pub fn is_on_stage(&self) -> bool {
        self.on_stage
    }

    pub fn set_on_stage(&mut self, on_stage: bool) {
        self.on_stage = on_stage;
    }
}

/// 解释器运行时状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RuntimeState {
    /// 控制流
    pub env: Environment,
    /// 角色，按名字索引
    pub roles: BTreeMap<String, Role>,
    /// 累积的输出
    pub output: Vec<u8>,
}

impl RuntimeState {
    /// 为剧本创建初始状态：每个角色栈为 `[0]`、不在台上
    pub fn new(program: &Program) -> Self {
        let roles = program
            .characters
            .iter()
            .enumerate()
            .map(|(index, character)| (character.name.clone(), Role::new(index + 1)))
            .collect();
        Self {
            env: Environment::new(),
            roles,
            output: Vec::new(),
        }
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    pub fn role_mut(&mut self, name: &str) -> Option<&mut Role> {
        self.roles.get_mut(name)
    }

    /// 按编号查找角色
    pub fn role_by_id_mut(&mut self, id: usize) -> Option<(&str, &mut Role)> {
        self.roles
            .iter_mut()
            .find(|(_, role)| role.id == id)
            .map(|(name, role)| (name.as_str(), role))
    }

    /// 台上除 `speaker` 以外的角色名
    pub fn others_on_stage(&self, speaker: &str) -> Vec<&str> {
        self.roles
            .iter()
            .filter(|(name, role)| role.on_stage && name.as_str() != speaker)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// 所有角色下台
    pub fn clear_stage(&mut self) {
        for role in self.roles.values_mut() {
            role.on_stage = false;
        }
    }

    /// 输出的文本形式（非 UTF-8 字节替换为 U+FFFD）
    pub fn output_lossy(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl EvalContext for RuntimeState {
    fn character_value(&self, name: &str) -> Option<i64> {
        self.roles.get(name).map(Role::value)
    }
}
