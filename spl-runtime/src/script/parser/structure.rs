//! # 结构解析
//!
//! 递归下降构建 Program → Act → Scene → Line。
//!
//! ```text
//! Program := 标题<终结符> { 角色名 , 描述<终结符> } { Act }
//! Act     := "Act" 罗马数字 [:] 描述<终结符> { Scene }
//! Scene   := "Scene" 罗马数字 [:] 描述<终结符> { Line }
//! Line    := "[Enter" | "[Exit" | "[Exeunt" 名字... "]"
//!          | 说话者 ":" { Sentence }
//! ```

use tracing::{trace, warn};

use crate::error::ParseError;
use crate::keywords::Keywords;
use crate::script::ast::{Act, Character, Line, Program, Roman, Scene, StageAction};
use crate::script::tokenizer::{SENTINEL, is_terminator};

use super::cursor::{Cursor, join_with_delimiter};
use super::sentence::parse_sentence;

const ACT: &str = "Act";
const SCENE: &str = "Scene";
const AND: &str = "and";
const COMMA: &str = ",";
const COLON: &str = ":";
const CLOSE_BRACKET: &str = "]";

/// 结构解析器
///
/// 游标是唯一的位置状态；解析器本身只持有词典并收集非致命警告。
pub struct StructureParser<'k> {
    keywords: &'k Keywords,
    /// 解析警告（非致命错误）
    pub warnings: Vec<ParseError>,
}

impl<'k> StructureParser<'k> {
    pub fn new(keywords: &'k Keywords) -> Self {
        Self {
            keywords,
            warnings: Vec::new(),
        }
    }

    /// 解析整部剧本
    pub fn parse_program<'a>(
        &mut self,
        cursor: Cursor<'a>,
    ) -> Result<(Program, Cursor<'a>), ParseError> {
        let (body, terminator, mut cursor) = cursor.take_until("标题的终结符", is_terminator)?;
        let title = join_with_delimiter(body, terminator);

        let mut characters = Vec::new();
        while cursor.peek(0) != ACT {
            let (character, next) = self.parse_character(cursor)?;
            trace!(name = %character.name, "角色声明");
            characters.push(character);
            cursor = next;
        }

        let mut acts = Vec::new();
        while cursor.peek(0) == ACT {
            let (act, next) = self.parse_act(cursor)?;
            acts.push(act);
            cursor = next;
        }

        if cursor.peek(0) != SENTINEL {
            return Err(ParseError::UnexpectedToken {
                token: cursor.peek(0).to_string(),
                position: cursor.position(),
            });
        }

        Ok((
            Program {
                title,
                characters,
                acts,
            },
            cursor,
        ))
    }

    /// `Romeo, a young man.`
    fn parse_character<'a>(
        &mut self,
        cursor: Cursor<'a>,
    ) -> Result<(Character, Cursor<'a>), ParseError> {
        let (name, _, cursor) = cursor.take_until("角色名后的逗号", |t| t == COMMA)?;
        let (body, terminator, cursor) = cursor.take_until("角色描述的终结符", is_terminator)?;
        Ok((
            Character {
                name: name.join(" "),
                description: join_with_delimiter(body, terminator),
            },
            cursor,
        ))
    }

    fn parse_act<'a>(&mut self, cursor: Cursor<'a>) -> Result<(Act, Cursor<'a>), ParseError> {
        let (number, cursor) = self.parse_roman(cursor)?;
        let (description, mut cursor) = parse_description(cursor)?;
        trace!(act = %number.text, "解析幕");

        let mut scenes = Vec::new();
        while cursor.peek(0) == SCENE {
            let (scene, next) = self.parse_scene(cursor)?;
            scenes.push(scene);
            cursor = next;
        }

        Ok((
            Act {
                number,
                description,
                scenes,
            },
            cursor,
        ))
    }

    fn parse_scene<'a>(&mut self, cursor: Cursor<'a>) -> Result<(Scene, Cursor<'a>), ParseError> {
        let (number, cursor) = self.parse_roman(cursor)?;
        let (description, mut cursor) = parse_description(cursor)?;
        trace!(scene = %number.text, "解析场");

        let mut lines = Vec::new();
        while cursor.peek(0) != ACT && cursor.peek(0) != SCENE && cursor.remaining() > 1 {
            let (line, next) = self.parse_line(cursor)?;
            lines.push(line);
            cursor = next;
        }

        Ok((
            Scene {
                number,
                description,
                lines,
            },
            cursor,
        ))
    }

    /// 解析舞台指示或一段对白
    pub fn parse_line<'a>(&mut self, cursor: Cursor<'a>) -> Result<(Line, Cursor<'a>), ParseError> {
        let first = cursor.peek(0);

        if let Some(action) = StageAction::from_token(first) {
            let (body, _, cursor) = cursor
                .advance(1)
                .take_until("舞台指示的 ']'", |t| t == CLOSE_BRACKET)?;
            let names = body
                .iter()
                .filter(|t| **t != AND && **t != COMMA)
                .map(|t| t.to_string())
                .collect();
            return Ok((Line::StageDirection { action, names }, cursor));
        }

        if first.starts_with('[') {
            return Err(ParseError::UnexpectedToken {
                token: first.to_string(),
                position: cursor.position(),
            });
        }

        let speaker = first.trim_end_matches(':').to_string();
        let mut cursor = cursor.advance(2);
        let mut sentences = Vec::new();
        while !at_line_end(&cursor) {
            let (sentence, warning, next) = parse_sentence(self.keywords, cursor)?;
            if let Some(warning) = warning {
                self.warn(warning);
            }
            trace!(speaker = %speaker, kind = sentence.kind(), "解析句子");
            sentences.push(sentence);
            cursor = next;
        }

        Ok((Line::Dialogue { speaker, sentences }, cursor))
    }

    /// 罗马数字标题：恰好消费两个 token（`Act`/`Scene` 与数字）
    pub fn parse_roman<'a>(&mut self, cursor: Cursor<'a>) -> Result<(Roman, Cursor<'a>), ParseError> {
        let numeral = cursor.peek(1);
        if numeral == SENTINEL {
            return Err(ParseError::TokenExhausted {
                expected: "罗马数字",
                position: cursor.position(),
            });
        }

        let roman = Roman::new(numeral);
        if !roman.is_supported() {
            self.warn(ParseError::UnsupportedNumeral {
                numeral: numeral.to_string(),
                position: cursor.position() + 1,
            });
        }
        Ok((roman, cursor.advance(2)))
    }

    fn warn(&mut self, warning: ParseError) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// 描述：可选的前导冒号，之后到终结符为止
fn parse_description(cursor: Cursor<'_>) -> Result<(String, Cursor<'_>), ParseError> {
    let cursor = if cursor.peek(0) == COLON {
        cursor.advance(1)
    } else {
        cursor
    };
    let (body, terminator, cursor) = cursor.take_until("描述的终结符", is_terminator)?;
    Ok((join_with_delimiter(body, terminator), cursor))
}

/// 对白是否结束：下一行的 `说话者 :`、舞台指示、幕/场标题，或只剩哨兵
fn at_line_end(cursor: &Cursor<'_>) -> bool {
    cursor.peek(1) == COLON
        || cursor.peek(0).starts_with('[')
        || cursor.peek(0) == ACT
        || cursor.peek(0) == SCENE
        || cursor.remaining() < 2
}
