//! # Keywords 模块
//!
//! 关键字词典：把小写英文单词映射到语义类别。
//!
//! ## 词典文件格式（`.kws`）
//!
//! 以空白分隔的 `单词 值` 对，例如：
//!
//! ```text
//! speak 1
//! mind 1
//! open 2
//! heart 2
//! ```
//!
//! 末尾落单的单词会被忽略。单词统一转为小写。
//!
//! ## 类别
//!
//! - 输出/输入类别：1 = 按字符，其他非零值 = 按数字
//! - 名词：基值
//! - 形容词、人称名词：仅判断是否存在
//! - 运算：单词 → [`Operation`]，元数必须与内置定义一致
//! - goto / 条件 / push / pop：固定的句首关键字集合

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::KeywordError;
use crate::script::expr::Operation;

/// 输入/输出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IoMode {
    /// 按字符码
    Character,
    /// 按十进制数字
    Number,
}

impl IoMode {
    /// 由关键字类别得到方式；0 表示不是该类关键字
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => None,
            1 => Some(Self::Character),
            _ => Some(Self::Number),
        }
    }
}

/// 六个词典文件的文本内容
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSources<'a> {
    pub outputs: &'a str,
    pub inputs: &'a str,
    pub operations: &'a str,
    pub nouns: &'a str,
    pub adjectives: &'a str,
    pub personal_nouns: &'a str,
}

impl<'a> KeywordSources<'a> {
    /// 词典文件名（不含扩展名）与对应字段
    pub const FILE_STEMS: [&'static str; 6] = [
        "outputs",
        "inputs",
        "operations",
        "nouns",
        "adjectives",
        "personalnouns",
    ];
}

/// 关键字词典
#[derive(Debug, Clone, Default)]
pub struct Keywords {
    outputs: HashMap<String, i64>,
    inputs: HashMap<String, i64>,
    nouns: HashMap<String, i64>,
    adjectives: HashSet<String>,
    personal_nouns: HashSet<String>,
    operations: HashMap<String, Operation>,
    gotos: HashSet<String>,
    conditions: HashSet<String>,
    pushes: HashSet<String>,
    pops: HashSet<String>,
}

const DEFAULT_GOTOS: &[&str] = &["let"];
const DEFAULT_CONDITIONS: &[&str] = &["if"];
const DEFAULT_PUSHES: &[&str] = &["remember"];
const DEFAULT_POPS: &[&str] = &["recall"];

const OPERATIONS: &[(&str, Operation)] = &[
    ("sum", Operation::Sum),
    ("difference", Operation::Difference),
    ("product", Operation::Product),
    ("quotient", Operation::Quotient),
    ("division", Operation::Quotient),
    ("square", Operation::Square),
    ("cube", Operation::Cube),
    ("root", Operation::Root),
    ("twice", Operation::Twice),
];

const POSITIVE_NOUNS: &[&str] = &[
    "angel", "apple", "bluebird", "brother", "cat", "chihuahua", "cousin", "cow", "daughter",
    "door", "face", "father", "fellow", "granddaughter", "grandfather", "grandmother",
    "grandson", "hair", "hamster", "heaven", "horse", "king", "kingdom", "lady", "lord", "love",
    "mother", "nephew", "niece", "pony", "prince", "purse", "road", "rose", "sister", "sky",
    "son", "squirrel", "tree", "uncle", "wind",
];

const NEGATIVE_NOUNS: &[&str] = &[
    "bastard", "beggar", "blister", "codpiece", "coward", "curse", "death", "devil", "draught",
    "famine", "flirt-gill", "goat", "hate", "hog", "hound", "leech", "lie", "pig", "plague",
    "starvation", "toad", "war", "wolf",
];

const ZERO_NOUNS: &[&str] = &["nothing", "zero"];

const ADJECTIVES: &[&str] = &[
    "amazing", "beautiful", "blossoming", "bold", "brave", "charming", "clearest", "cunning",
    "cute", "delicious", "embroidered", "fair", "fine", "gentle", "golden", "good", "handsome",
    "happy", "healthy", "honest", "lovely", "loving", "mighty", "noble", "peaceful", "pretty",
    "prompt", "proud", "reddest", "rich", "smooth", "sunny", "sweet", "sweetest", "trustworthy",
    "warm", "bad", "cowardly", "cursed", "damned", "dirty", "disgusting", "distasteful", "dusty",
    "evil", "fat", "fat-kidneyed", "fatherless", "foul", "hairy", "half-witted", "horrible",
    "horrid", "infected", "lying", "miserable", "misused", "oozing", "rotten", "smelly",
    "snotty", "sorry", "stinking", "stuffed", "stupid", "vile", "villainous", "worried", "big",
    "black", "blue", "bluest", "bottomless", "furry", "green", "hard", "huge", "large", "little",
    "normal", "old", "purple", "red", "rural", "small", "tiny", "white", "yellow",
];

const PERSONAL_NOUNS: &[&str] = &["you", "thou", "thee"];

const OUTPUTS: &[(&str, i64)] = &[("speak", 1), ("mind", 1), ("open", 2), ("heart", 2)];
const INPUTS: &[(&str, i64)] = &[("open", 1), ("mind", 1), ("listen", 2), ("your", 2)];

fn word_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Keywords {
    /// 只含 goto / 条件 / push / pop 默认关键字的词典
    pub fn empty() -> Self {
        Self {
            gotos: word_set(DEFAULT_GOTOS),
            conditions: word_set(DEFAULT_CONDITIONS),
            pushes: word_set(DEFAULT_PUSHES),
            pops: word_set(DEFAULT_POPS),
            ..Self::default()
        }
    }

    /// 内置英文词典
    pub fn standard() -> Self {
        let mut keywords = Self::empty();
        for noun in POSITIVE_NOUNS {
            keywords.nouns.insert(noun.to_string(), 1);
        }
        for noun in NEGATIVE_NOUNS {
            keywords.nouns.insert(noun.to_string(), -1);
        }
        for noun in ZERO_NOUNS {
            keywords.nouns.insert(noun.to_string(), 0);
        }
        keywords.adjectives = word_set(ADJECTIVES);
        keywords.personal_nouns = word_set(PERSONAL_NOUNS);
        keywords.outputs = OUTPUTS.iter().map(|(w, c)| (w.to_string(), *c)).collect();
        keywords.inputs = INPUTS.iter().map(|(w, c)| (w.to_string(), *c)).collect();
        keywords.operations = OPERATIONS
            .iter()
            .map(|(w, op)| (w.to_string(), *op))
            .collect();
        keywords
    }

    /// 从六个 `.kws` 文件的文本构建词典
    pub fn from_sources(sources: &KeywordSources<'_>) -> Result<Self, KeywordError> {
        let mut keywords = Self::empty();
        keywords.outputs = parse_kws("outputs", sources.outputs)?.into_iter().collect();
        keywords.inputs = parse_kws("inputs", sources.inputs)?.into_iter().collect();
        keywords.nouns = parse_kws("nouns", sources.nouns)?.into_iter().collect();
        keywords.adjectives = parse_kws("adjectives", sources.adjectives)?
            .into_iter()
            .map(|(word, _)| word)
            .collect();
        keywords.personal_nouns = parse_kws("personalnouns", sources.personal_nouns)?
            .into_iter()
            .filter(|(_, value)| *value != 0)
            .map(|(word, _)| word)
            .collect();

        for (word, arity) in parse_kws("operations", sources.operations)? {
            let operation = Operation::from_name(&word)
                .ok_or_else(|| KeywordError::UnknownOperation { word: word.clone() })?;
            if usize::try_from(arity).ok() != Some(operation.arity()) {
                return Err(KeywordError::ArityMismatch {
                    word,
                    expected: operation.arity(),
                    actual: arity,
                });
            }
            keywords.operations.insert(word, operation);
        }

        Ok(keywords)
    }

    pub fn with_noun(mut self, word: &str, value: i64) -> Self {
        self.nouns.insert(word.to_lowercase(), value);
        self
    }

    pub fn with_adjective(mut self, word: &str) -> Self {
        self.adjectives.insert(word.to_lowercase());
        self
    }

    pub fn with_personal_noun(mut self, word: &str) -> Self {
        self.personal_nouns.insert(word.to_lowercase());
        self
    }

    pub fn with_output(mut self, word: &str, class: i64) -> Self {
        self.outputs.insert(word.to_lowercase(), class);
        self
    }

    pub fn with_input(mut self, word: &str, class: i64) -> Self {
        self.inputs.insert(word.to_lowercase(), class);
        self
    }

    pub fn with_operation(mut self, word: &str, operation: Operation) -> Self {
        self.operations.insert(word.to_lowercase(), operation);
        self
    }

    pub fn with_goto(mut self, word: &str) -> Self {
        self.gotos.insert(word.to_lowercase());
        self
    }

    /// 输出类别，不是输出关键字时为 0
    pub fn output_class(&self, word: &str) -> i64 {
        self.outputs.get(word).copied().unwrap_or(0)
    }

    /// 输入类别，不是输入关键字时为 0
    pub fn input_class(&self, word: &str) -> i64 {
        self.inputs.get(word).copied().unwrap_or(0)
    }

    pub fn noun_value(&self, word: &str) -> Option<i64> {
        self.nouns.get(word).copied()
    }

    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(word)
    }

    pub fn is_personal_noun(&self, word: &str) -> bool {
        self.personal_nouns.contains(word)
    }

    pub fn operation(&self, word: &str) -> Option<Operation> {
        self.operations.get(word).copied()
    }

    pub fn is_goto(&self, word: &str) -> bool {
        self.gotos.contains(word)
    }

    pub fn is_conditional(&self, word: &str) -> bool {
        self.conditions.contains(word)
    }

    pub fn is_push(&self, word: &str) -> bool {
        self.pushes.contains(word)
    }

    pub fn is_pop(&self, word: &str) -> bool {
        self.pops.contains(word)
    }
}

/// 解析 `.kws` 文本
///
/// `source_name` 只用于错误信息。
pub fn parse_kws(source_name: &str, text: &str) -> Result<Vec<(String, i64)>, KeywordError> {
    let mut entries = Vec::new();
    let mut words = text.split_whitespace();
    while let (Some(word), Some(value)) = (words.next(), words.next()) {
        let parsed = value.parse::<i64>().map_err(|_| KeywordError::InvalidValue {
            source_name: source_name.to_string(),
            word: word.to_string(),
            value: value.to_string(),
        })?;
        entries.push((word.to_lowercase(), parsed));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kws_pairs() {
        let entries = parse_kws("nouns", "Pig -1\ncat 1\n  rose\t1 dangling").unwrap();
        assert_eq!(
            entries,
            vec![
                ("pig".to_string(), -1),
                ("cat".to_string(), 1),
                ("rose".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_parse_kws_invalid_value() {
        let err = parse_kws("nouns", "pig many").unwrap_err();
        assert_eq!(
            err,
            KeywordError::InvalidValue {
                source_name: "nouns".to_string(),
                word: "pig".to_string(),
                value: "many".to_string(),
            }
        );
        assert!(err.to_string().contains("nouns"));
    }

    #[test]
    fn test_io_mode_from_class() {
        assert_eq!(IoMode::from_class(0), None);
        assert_eq!(IoMode::from_class(1), Some(IoMode::Character));
        assert_eq!(IoMode::from_class(2), Some(IoMode::Number));
    }

    #[test]
    fn test_from_sources() {
        let sources = KeywordSources {
            outputs: "speak 1 mind 1",
            inputs: "listen 2",
            operations: "sum 2 twice 1 division 2",
            nouns: "pig 9 cat 1",
            adjectives: "big 1",
            personal_nouns: "you 1 thee 0",
        };
        let kw = Keywords::from_sources(&sources).unwrap();

        assert_eq!(kw.output_class("speak"), 1);
        assert_eq!(kw.output_class("open"), 0);
        assert_eq!(kw.input_class("listen"), 2);
        assert_eq!(kw.operation("division"), Some(Operation::Quotient));
        assert_eq!(kw.operation("product"), None);
        assert_eq!(kw.noun_value("pig"), Some(9));
        assert!(kw.is_adjective("big"));
        assert!(kw.is_personal_noun("you"));
        // 值为 0 的人称名词视为不存在
        assert!(!kw.is_personal_noun("thee"));
        // 控制关键字保持默认
        assert!(kw.is_goto("let"));
        assert!(kw.is_pop("recall"));
    }

    #[test]
    fn test_from_sources_operation_errors() {
        let sources = KeywordSources {
            operations: "sum 1",
            ..KeywordSources::default()
        };
        assert_eq!(
            Keywords::from_sources(&sources).unwrap_err(),
            KeywordError::ArityMismatch {
                word: "sum".to_string(),
                expected: 2,
                actual: 1,
            }
        );

        let sources = KeywordSources {
            operations: "modulo 2",
            ..KeywordSources::default()
        };
        assert_eq!(
            Keywords::from_sources(&sources).unwrap_err(),
            KeywordError::UnknownOperation {
                word: "modulo".to_string()
            }
        );
    }

    #[test]
    fn test_standard_dictionary() {
        let kw = Keywords::standard();

        assert_eq!(kw.noun_value("rose"), Some(1));
        assert_eq!(kw.noun_value("pig"), Some(-1));
        assert_eq!(kw.noun_value("nothing"), Some(0));
        assert!(kw.is_adjective("lovely"));
        assert!(kw.is_personal_noun("you"));
        assert_eq!(kw.output_class("speak"), 1);
        assert_eq!(kw.output_class("heart"), 2);
        assert_eq!(kw.input_class("open"), 1);
        assert_eq!(kw.operation("twice"), Some(Operation::Twice));
        assert!(kw.is_conditional("if"));
        assert!(kw.is_push("remember"));
    }
}
