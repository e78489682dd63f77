//! # 句子分类与解析
//!
//! 按首词和第三个词的关键字类别决定句子类型，优先级固定，先命中者胜：
//!
//! ```text
//! 1. 首词是人称名词            → Assignment
//! 2. 首词与第三词输入类别相同  → Input
//! 3. 首词与第三词输出类别相同  → Output
//! 4. goto 关键字               → Goto
//! 5. 条件关键字                → Conditional
//! 6. push 关键字               → Push
//! 7. pop 关键字                → Pop
//! 8. 其他                      → Plain
//! ```
//!
//! 解析完成后，终结符为 `?` 的句子一律改标为 Query。

use crate::error::ParseError;
use crate::keywords::{IoMode, Keywords};
use crate::script::ast::{Clause, JumpTarget, Roman, Sentence, Terminator};
use crate::script::tokenizer::is_terminator;

use super::cursor::Cursor;

/// 分类结果（尚未读取句子内容）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    Assignment,
    Input(IoMode),
    Output(IoMode),
    Goto,
    Conditional,
    Push,
    Pop,
    Plain,
}

/// 根据游标处的首词和第三词分类
pub fn classify(keywords: &Keywords, cursor: &Cursor<'_>) -> SentenceKind {
    let w0 = cursor.peek(0).to_lowercase();
    let w2 = cursor.peek(2).to_lowercase();

    if keywords.is_personal_noun(&w0) {
        return SentenceKind::Assignment;
    }

    let input = keywords.input_class(&w0);
    if input == keywords.input_class(&w2) {
        if let Some(mode) = IoMode::from_class(input) {
            return SentenceKind::Input(mode);
        }
    }

    let output = keywords.output_class(&w0);
    if output == keywords.output_class(&w2) {
        if let Some(mode) = IoMode::from_class(output) {
            return SentenceKind::Output(mode);
        }
    }

    if keywords.is_goto(&w0) {
        SentenceKind::Goto
    } else if keywords.is_conditional(&w0) {
        SentenceKind::Conditional
    } else if keywords.is_push(&w0) {
        SentenceKind::Push
    } else if keywords.is_pop(&w0) {
        SentenceKind::Pop
    } else {
        SentenceKind::Plain
    }
}

/// 分类并解析一个句子
///
/// 返回句子、其中出现的不支持罗马数字（非致命），以及句子之后的游标。
pub fn parse_sentence<'a>(
    keywords: &Keywords,
    cursor: Cursor<'a>,
) -> Result<(Sentence, Option<ParseError>, Cursor<'a>), ParseError> {
    let kind = classify(keywords, &cursor);
    let (body, terminator, next) = cursor.take_until("句子终结符", is_terminator)?;

    let terminator = Terminator::from_token(terminator).ok_or_else(|| {
        ParseError::UnexpectedToken {
            token: terminator.to_string(),
            position: next.position() - 1,
        }
    })?;
    let clause = Clause::new(body.iter().copied(), terminator);

    let mut warning = None;
    let sentence = match kind {
        SentenceKind::Assignment => Sentence::Assignment(clause),
        SentenceKind::Input(mode) => Sentence::Input { clause, mode },
        SentenceKind::Output(mode) => Sentence::Output { clause, mode },
        SentenceKind::Goto => {
            let target = jump_target(&clause.words).map(|(index, target, roman)| {
                if !roman.is_supported() {
                    warning = Some(ParseError::UnsupportedNumeral {
                        numeral: roman.text,
                        position: cursor.position() + index,
                    });
                }
                target
            });
            Sentence::Goto { clause, target }
        }
        SentenceKind::Conditional => Sentence::Conditional(clause),
        SentenceKind::Push => Sentence::Push(clause),
        SentenceKind::Pop => Sentence::Pop(clause),
        SentenceKind::Plain => Sentence::Plain(clause),
    };

    Ok((sentence.into_query_if_question(), warning, next))
}

/// 在跳转句中查找 `act`/`scene` + 罗马数字
///
/// 后面不是罗马数字字母组成的词（如 `the scene of`）时继续向后找。
/// 返回 (数字所在下标, 目标, 罗马数字)。
fn jump_target(words: &[String]) -> Option<(usize, JumpTarget, Roman)> {
    words.windows(2).enumerate().find_map(|(index, pair)| {
        if !looks_like_numeral(&pair[1]) {
            return None;
        }
        let roman = Roman::new(pair[1].as_str());
        let target = if pair[0].eq_ignore_ascii_case("act") {
            JumpTarget::Act(roman.value)
        } else if pair[0].eq_ignore_ascii_case("scene") {
            JumpTarget::Scene(roman.value)
        } else {
            return None;
        };
        Some((index + 1, target, roman))
    })
}

/// 只由大写罗马数字字母组成
fn looks_like_numeral(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| "IVXLCDM".contains(c))
}
