//! # Executor 模块
//!
//! 执行单行（舞台指示或对白）及其中的句子。
//!
//! ## 职责
//!
//! - 舞台指示：修改角色在台状态
//! - 对白：确定对白对象，依次执行句子，遇到跳转立即停止
//! - 句子：穷举匹配 [`Sentence`] 的各个变体

use std::io::BufRead;

use tracing::{debug, trace, warn};

use crate::error::RuntimeError;
use crate::keywords::{IoMode, Keywords};
use crate::script::ast::{Clause, JumpTarget, Line, Program, Sentence, StageAction};
use crate::script::expr::evaluate;
use crate::state::{Role, RuntimeState};

/// 行执行器
///
/// 持有词典与输入源；可变状态全部通过参数传入。
pub struct Executor<'a> {
    keywords: &'a Keywords,
    input: Box<dyn BufRead + 'a>,
}

impl<'a> Executor<'a> {
    /// 创建新的执行器
    pub fn new(keywords: &'a Keywords, input: Box<dyn BufRead + 'a>) -> Self {
        Self { keywords, input }
    }

    /// 执行一行
    pub fn execute_line(
        &mut self,
        line: &Line,
        state: &mut RuntimeState,
        program: &Program,
    ) -> Result<(), RuntimeError> {
        match line {
            Line::StageDirection { action, names } => {
                self.execute_stage_direction(*action, names, state)
            }
            Line::Dialogue { speaker, sentences } => {
                if state.role(speaker).is_none() {
                    return Err(RuntimeError::UnknownCharacter {
                        name: speaker.clone(),
                    });
                }

                let others = state.others_on_stage(speaker);
                state.env.target = match others.as_slice() {
                    [only] => state.role(only).map(Role::id),
                    _ => None,
                };

                for sentence in sentences {
                    self.execute_sentence(sentence, speaker, state, program)?;
                    if state.env.pending_jump.is_some() {
                        break;
                    }
                }
                Ok(())
            }
        }
    }

    fn execute_stage_direction(
        &mut self,
        action: StageAction,
        names: &[String],
        state: &mut RuntimeState,
    ) -> Result<(), RuntimeError> {
        if names.is_empty() && action == StageAction::Exeunt {
            debug!("全体退场");
            state.clear_stage();
            return Ok(());
        }

        let on_stage = action == StageAction::Enter;
        for name in names {
            let role = state
                .role_mut(name)
                .ok_or_else(|| RuntimeError::UnknownCharacter { name: name.clone() })?;
            role.set_on_stage(on_stage);
            debug!(name = %name, on_stage, "舞台指示");
        }
        Ok(())
    }

    /// 执行单个句子
    pub fn execute_sentence(
        &mut self,
        sentence: &Sentence,
        speaker: &str,
        state: &mut RuntimeState,
        program: &Program,
    ) -> Result<(), RuntimeError> {
        trace!(speaker, kind = sentence.kind(), text = %sentence.clause().text(), "执行句子");

        match sentence {
            Sentence::Assignment(clause) => {
                let fallback = target_role(state, speaker)?.value();
                let value = self.evaluate(clause, fallback, state)?;
                target_role(state, speaker)?.set_value(value);
                Ok(())
            }

            Sentence::Output { mode, .. } => {
                let value = target_role(state, speaker)?.value();
                match mode {
                    // 按字节截断
                    IoMode::Character => state.output.push(value as u8),
                    IoMode::Number => state.output.extend_from_slice(value.to_string().as_bytes()),
                }
                debug!(value, ?mode, "输出");
                Ok(())
            }

            Sentence::Input { mode, .. } => {
                let value = match mode {
                    IoMode::Character => self.read_char()?,
                    IoMode::Number => self.read_number()?,
                };
                target_role(state, speaker)?.set_value(value);
                Ok(())
            }

            Sentence::Goto { target, clause } => match target {
                Some(target) => {
                    validate_jump(*target, state, program)?;
                    debug!(%target, "跳转");
                    state.env.pending_jump = Some(*target);
                    Ok(())
                }
                None => {
                    warn!(text = %clause.text(), "跳转句缺少目标，已忽略");
                    Ok(())
                }
            },

            Sentence::Push(clause) => {
                let fallback = target_role(state, speaker)?.value();
                let value = self.evaluate(clause, fallback, state)?;
                target_role(state, speaker)?.push(value);
                Ok(())
            }

            Sentence::Pop(_) => {
                let (name, role) = target_entry(state, speaker)?;
                match role.pop() {
                    Some(_) => Ok(()),
                    None => Err(RuntimeError::StackUnderflow {
                        name: name.to_string(),
                    }),
                }
            }

            // 比较语义需要比较级词典，目前不改变状态
            Sentence::Conditional(_) | Sentence::Query(_) | Sentence::Plain(_) => Ok(()),
        }
    }

    fn evaluate(
        &self,
        clause: &Clause,
        fallback: i64,
        state: &RuntimeState,
    ) -> Result<i64, RuntimeError> {
        Ok(evaluate(&clause.words, fallback, self.keywords, state)?)
    }

    /// 读取一个字节；输入结束时为 -1
    fn read_char(&mut self) -> Result<i64, RuntimeError> {
        let buffer = self.input.fill_buf().map_err(input_error)?;
        let Some(&byte) = buffer.first() else {
            return Ok(-1);
        };
        self.input.consume(1);
        Ok(i64::from(byte))
    }

    /// 读取一行并解析为整数
    fn read_number(&mut self) -> Result<i64, RuntimeError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(input_error)?;
        if read == 0 {
            return Err(RuntimeError::InvalidInput {
                message: "输入已结束".to_string(),
            });
        }
        let trimmed = line.trim();
        trimmed.parse::<i64>().map_err(|_| RuntimeError::InvalidInput {
            message: format!("'{}' 不是整数", trimmed),
        })
    }
}

fn input_error(err: std::io::Error) -> RuntimeError {
    RuntimeError::InvalidInput {
        message: err.to_string(),
    }
}

/// 当前对白对象
fn target_role<'s>(
    state: &'s mut RuntimeState,
    speaker: &str,
) -> Result<&'s mut Role, RuntimeError> {
    target_entry(state, speaker).map(|(_, role)| role)
}

/// 当前对白对象（带名字）
///
/// 台上除说话者外没有或有多个角色时报错。
fn target_entry<'s>(
    state: &'s mut RuntimeState,
    speaker: &str,
) -> Result<(&'s str, &'s mut Role), RuntimeError> {
    let Some(id) = state.env.target else {
        let candidates: Vec<String> = state
            .others_on_stage(speaker)
            .into_iter()
            .map(str::to_string)
            .collect();
        return Err(if candidates.is_empty() {
            RuntimeError::MissingAddressee {
                speaker: speaker.to_string(),
            }
        } else {
            RuntimeError::AmbiguousAddressee {
                speaker: speaker.to_string(),
                candidates,
            }
        });
    };
    state
        .role_by_id_mut(id)
        .ok_or_else(|| RuntimeError::UnknownCharacter {
            name: format!("#{}", id),
        })
}

/// 跳转目标必须落在剧本范围内（场按当前幕计算）
fn validate_jump(
    target: JumpTarget,
    state: &RuntimeState,
    program: &Program,
) -> Result<(), RuntimeError> {
    let valid = match target {
        JumpTarget::Act(n) => (1..=program.acts.len()).contains(&n),
        JumpTarget::Scene(n) => program
            .acts
            .get(state.env.act.wrapping_sub(1))
            .is_some_and(|act| (1..=act.scenes.len()).contains(&n)),
    };
    if valid {
        Ok(())
    } else {
        Err(RuntimeError::InvalidJumpTarget {
            target: target.to_string(),
        })
    }
}
