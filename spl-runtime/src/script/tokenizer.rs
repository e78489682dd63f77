//! # 分词
//!
//! 把源文本切成单词 token。句末标点、逗号、冒号和 `]` 若位于单词末尾，
//! 会被拆成独立的 token。末尾追加一个哨兵 token，解析器总能安全地多看一个位置。

/// 流结束哨兵
pub const SENTINEL: &str = "\0";

/// 句子终结符
pub const TERMINATORS: [&str; 4] = [".", ";", "!", "?"];

/// 会从单词末尾拆出的字符
const SPLIT_CHARS: [char; 7] = ['.', ';', '!', '?', ',', ':', ']'];

/// 判断 token 是否为句子终结符
pub fn is_terminator(token: &str) -> bool {
    TERMINATORS.contains(&token)
}

/// 对源文本分词
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        match word.char_indices().last() {
            Some((index, last)) if SPLIT_CHARS.contains(&last) => {
                if index > 0 {
                    tokens.push(&word[..index]);
                }
                tokens.push(&word[index..]);
            }
            _ => tokens.push(word),
        }
    }
    tokens.push(SENTINEL);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_splits_trailing_punctuation() {
        let tokens = tokenize("Romeo, a young man with a remarkable patience.");
        assert_snapshot!(
            tokens[..tokens.len() - 1].join(" | "),
            @"Romeo | , | a | young | man | with | a | remarkable | patience | ."
        );
        assert_eq!(tokens.last(), Some(&SENTINEL));
    }

    #[test]
    fn test_stage_direction_tokens() {
        let tokens = tokenize("[Enter Romeo and Juliet]\n[Exeunt]");
        assert_eq!(
            tokens,
            vec!["[Enter", "Romeo", "and", "Juliet", "]", "[Exeunt", "]", SENTINEL]
        );
    }

    #[test]
    fn test_only_last_character_is_split() {
        let tokens = tokenize("Act I: Hamlet's insults... Juliet:");
        assert_eq!(
            tokens,
            vec!["Act", "I", ":", "Hamlet's", "insults..", ".", "Juliet", ":", SENTINEL]
        );
    }

    #[test]
    fn test_lone_punctuation_has_no_empty_prefix() {
        let tokens = tokenize("Speak your mind !");
        assert_eq!(tokens, vec!["Speak", "your", "mind", "!", SENTINEL]);
    }

    #[test]
    fn test_empty_input_yields_sentinel() {
        assert_eq!(tokenize(""), vec![SENTINEL]);
        assert_eq!(tokenize(" \n\t "), vec![SENTINEL]);
    }

    #[test]
    fn test_retokenizing_is_stable() {
        let text = "Juliet: You are as lovely as the sum of a rose and a rose! Speak your mind!";
        let first = tokenize(text);
        let rejoined = first[..first.len() - 1].join(" ");
        assert_eq!(tokenize(&rejoined), first);
    }

    #[test]
    fn test_terminators() {
        assert!(is_terminator("."));
        assert!(is_terminator("?"));
        assert!(!is_terminator(","));
        assert!(!is_terminator(""));
    }
}
