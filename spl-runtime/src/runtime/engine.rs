//! # Engine 模块
//!
//! 解释器核心执行引擎。
//!
//! ## 执行模型
//!
//! ```text
//! Program ─► Act ─► Scene ─► Line ─► Sentence
//! ```
//!
//! 1. 幕循环：执行当前幕，然后处理挂起的 `Act(n)` 跳转，否则进入下一幕
//! 2. 场循环：执行当前场，消费挂起的 `Scene(n)` 跳转；遇到 `Act` 跳转则退出交给幕循环
//! 3. 场内按顺序执行行，出现挂起跳转时停止
//!
//! 幕、场编号都是位置序号，与原文中的罗马数字无关。

use std::io::{self, BufRead};

use tracing::debug;

use crate::error::RuntimeError;
use crate::keywords::Keywords;
use crate::runtime::executor::Executor;
use crate::script::ast::{Act, JumpTarget, Program, Scene};
use crate::state::RuntimeState;

/// 剧本解释器
///
/// 持有剧本、词典、运行时状态与输入源，不依赖任何全局状态。
///
/// # 使用示例
///
/// ```ignore
/// let keywords = Keywords::standard();
/// let program = Parser::new(&keywords).parse(text)?;
///
/// let mut interpreter = Interpreter::new(&program, &keywords);
/// interpreter.run()?;
/// println!("{}", interpreter.state().output_lossy());
/// ```
pub struct Interpreter<'a> {
    /// 当前剧本
    program: &'a Program,
    /// 行执行器
    executor: Executor<'a>,
    /// 运行时状态
    state: RuntimeState,
}

impl<'a> Interpreter<'a> {
    /// 创建解释器，输入源为空
    pub fn new(program: &'a Program, keywords: &'a Keywords) -> Self {
        Self::with_input(program, keywords, io::empty())
    }

    /// 创建解释器，输入句从 `input` 读取
    pub fn with_input(
        program: &'a Program,
        keywords: &'a Keywords,
        input: impl BufRead + 'a,
    ) -> Self {
        Self {
            program,
            executor: Executor::new(keywords, Box::new(input)),
            state: RuntimeState::new(program),
        }
    }

    /// 执行整个剧本
    ///
    /// 每次执行前重置运行时状态：所有角色栈回到 `[0]`、下台，输出清空。
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let program = self.program;
        self.state = RuntimeState::new(program);

        while let Some(act) = nth(&program.acts, self.state.env.act) {
            debug!(act = self.state.env.act, description = %act.description, "进入幕");
            self.run_act(act)?;

            self.state.env.act = match self.state.env.pending_jump.take() {
                Some(JumpTarget::Act(n)) => n,
                // 场跳转已在幕内消费
                _ => self.state.env.act + 1,
            };
        }
        Ok(())
    }

    fn run_act(&mut self, act: &Act) -> Result<(), RuntimeError> {
        self.state.env.scene = 1;

        while let Some(scene) = nth(&act.scenes, self.state.env.scene) {
            debug!(scene = self.state.env.scene, description = %scene.description, "进入场");
            self.run_scene(scene)?;

            match self.state.env.pending_jump {
                Some(JumpTarget::Scene(n)) => {
                    self.state.env.pending_jump = None;
                    self.state.env.scene = n;
                }
                Some(JumpTarget::Act(_)) => return Ok(()),
                None => self.state.env.scene += 1,
            }
        }
        Ok(())
    }

    fn run_scene(&mut self, scene: &Scene) -> Result<(), RuntimeError> {
        for line in &scene.lines {
            self.executor
                .execute_line(line, &mut self.state, self.program)?;
            if self.state.env.pending_jump.is_some() {
                break;
            }
        }
        Ok(())
    }

    /// 获取当前状态
    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    /// 已产生的输出
    pub fn output(&self) -> &[u8] {
        &self.state.output
    }

    /// 取出最终状态
    pub fn into_state(self) -> RuntimeState {
        self.state
    }

    /// 取出输出
    pub fn into_output(self) -> Vec<u8> {
        self.state.output
    }
}

/// 按 1 起始的序号取元素
fn nth<T>(items: &[T], ordinal: usize) -> Option<&T> {
    ordinal.checked_sub(1).and_then(|index| items.get(index))
}
