//! # 表达式模块
//!
//! 名词短语求值器：把 "the sum of a pig and a cat" 这样的英文短语算成整数。
//!
//! ## 求值规则
//!
//! 从左到右扫描，维护一个初始为 1 的乘数：
//!
//! - 形容词：乘数翻倍，继续扫描
//! - 名词：返回 乘数 × 名词基值
//! - 角色名：返回 乘数 × 该角色当前值
//! - 运算词（且下一个词不是运算词）：递归求出 arity 个操作数后套用运算
//! - 扫描到末尾：返回调用方给的回退值
//!
//! 算术按 `i64` 回绕，不做溢出检查。

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::keywords::Keywords;

/// 算术运算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Sum,
    Difference,
    Product,
    Quotient,
    Square,
    Cube,
    Root,
    Twice,
}

impl Operation {
    /// 按运算名查找（`division` 与 `quotient` 同义）
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sum" => Some(Self::Sum),
            "difference" => Some(Self::Difference),
            "product" => Some(Self::Product),
            "quotient" | "division" => Some(Self::Quotient),
            "square" => Some(Self::Square),
            "cube" => Some(Self::Cube),
            "root" => Some(Self::Root),
            "twice" => Some(Self::Twice),
            _ => None,
        }
    }

    /// 操作数个数
    pub fn arity(self) -> usize {
        match self {
            Self::Sum | Self::Difference | Self::Product | Self::Quotient => 2,
            Self::Square | Self::Cube | Self::Root | Self::Twice => 1,
        }
    }

    /// 按解析顺序对操作数套用运算
    ///
    /// `operands.len()` 必须等于 [`Operation::arity`]。
    pub fn apply(self, operands: &[i64]) -> Result<i64, EvalError> {
        match (self, operands) {
            (Self::Sum, [a, b]) => Ok(a.wrapping_add(*b)),
            (Self::Difference, [a, b]) => Ok(a.wrapping_sub(*b)),
            (Self::Product, [a, b]) => Ok(a.wrapping_mul(*b)),
            (Self::Quotient, [_, 0]) => Err(EvalError::DivisionByZero),
            (Self::Quotient, [a, b]) => Ok(a.wrapping_div(*b)),
            (Self::Square, [a]) => Ok(a.wrapping_mul(*a)),
            (Self::Cube, [a]) => Ok(a.wrapping_mul(*a).wrapping_mul(*a)),
            (Self::Root, [a]) if *a < 0 => Err(EvalError::NegativeRoot { value: *a }),
            (Self::Root, [a]) => Ok(integer_sqrt(*a)),
            (Self::Twice, [a]) => Ok(a.wrapping_mul(2)),
            _ => unreachable!("{:?} 收到 {} 个操作数", self, operands.len()),
        }
    }
}

/// 非负整数的平方根（向下取整）
fn integer_sqrt(value: i64) -> i64 {
    // f64 对大数有舍入误差，结果需要校正
    let mut root = (value as f64).sqrt() as i64;
    while root > 0 && root.checked_mul(root).is_none_or(|sq| sq > value) {
        root -= 1;
    }
    while (root + 1)
        .checked_mul(root + 1)
        .is_some_and(|sq| sq <= value)
    {
        root += 1;
    }
    root
}

/// 表达式求值上下文
///
/// 提供角色当前值的查找能力
pub trait EvalContext {
    /// 获取角色当前值；`None` 表示该词不是角色名
    fn character_value(&self, name: &str) -> Option<i64>;
}

/// 对名词短语求值
///
/// # 参数
///
/// - `words`: 句子的单词序列
/// - `fallback`: 短语中没有任何取值词时返回的值（通常是对白对象的当前值）
pub fn evaluate(
    words: &[String],
    fallback: i64,
    keywords: &Keywords,
    ctx: &impl EvalContext,
) -> Result<i64, EvalError> {
    let (value, _) = evaluate_from(words, 0, fallback, keywords, ctx)?;
    Ok(value)
}

/// 从 `start` 开始求值，返回 (值, 下一个未消费的位置)
fn evaluate_from(
    words: &[String],
    start: usize,
    fallback: i64,
    keywords: &Keywords,
    ctx: &impl EvalContext,
) -> Result<(i64, usize), EvalError> {
    let mut multiplier: i64 = 1;

    for (index, word) in words.iter().enumerate().skip(start) {
        let lower = word.to_lowercase();

        if keywords.is_adjective(&lower) {
            multiplier = multiplier.wrapping_mul(2);
        }

        if let Some(base) = keywords.noun_value(&lower) {
            return Ok((multiplier.wrapping_mul(base), index + 1));
        }

        // 角色名大小写敏感
        if let Some(value) = ctx.character_value(word) {
            return Ok((multiplier.wrapping_mul(value), index + 1));
        }

        let Some(operation) = keywords.operation(&lower) else {
            continue;
        };
        // 紧跟另一个运算词（或位于末尾）时，本词只是修饰
        let followed_by_operation = match words.get(index + 1) {
            Some(next) => keywords.operation(&next.to_lowercase()).is_some(),
            None => true,
        };
        if followed_by_operation {
            continue;
        }

        let mut operands = Vec::with_capacity(operation.arity());
        let mut next = index + 1;
        for _ in 0..operation.arity() {
            let (operand, after) = evaluate_from(words, next, fallback, keywords, ctx)?;
            operands.push(operand);
            next = after;
        }
        return Ok((operation.apply(&operands)?, next));
    }

    Ok((fallback, words.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// 测试用的简单上下文
    struct TestContext {
        values: HashMap<String, i64>,
    }

    impl TestContext {
        fn new() -> Self {
            Self {
                values: HashMap::new(),
            }
        }

        fn with_character(mut self, name: &str, value: i64) -> Self {
            self.values.insert(name.to_string(), value);
            self
        }
    }

    impl EvalContext for TestContext {
        fn character_value(&self, name: &str) -> Option<i64> {
            self.values.get(name).copied()
        }
    }

    fn words(phrase: &str) -> Vec<String> {
        phrase.split_whitespace().map(str::to_string).collect()
    }

    fn arithmetic_keywords() -> Keywords {
        Keywords::empty()
            .with_noun("pig", 9)
            .with_noun("cat", 1)
            .with_noun("rose", 3)
            .with_noun("king", 10)
            .with_noun("fool", 3)
            .with_adjective("flattering")
            .with_operation("sum", Operation::Sum)
            .with_operation("difference", Operation::Difference)
            .with_operation("product", Operation::Product)
            .with_operation("quotient", Operation::Quotient)
            .with_operation("square", Operation::Square)
            .with_operation("cube", Operation::Cube)
            .with_operation("root", Operation::Root)
            .with_operation("twice", Operation::Twice)
    }

    fn eval(phrase: &str, keywords: &Keywords) -> Result<i64, EvalError> {
        evaluate(&words(phrase), 0, keywords, &TestContext::new())
    }

    #[test]
    fn test_sum_of_nouns() {
        let kw = arithmetic_keywords();
        assert_eq!(eval("the sum of a pig and a cat", &kw).unwrap(), 10);
    }

    #[test]
    fn test_square_of_noun() {
        let kw = arithmetic_keywords();
        assert_eq!(eval("the square of a rose", &kw).unwrap(), 9);
    }

    #[test]
    fn test_twice_the_difference() {
        let kw = arithmetic_keywords();
        assert_eq!(
            eval("twice the difference between a king and a fool", &kw).unwrap(),
            14
        );
    }

    #[test]
    fn test_division_by_zero() {
        let kw = arithmetic_keywords().with_noun("pig", 0);
        assert_eq!(
            eval("the quotient between a cat and a pig", &kw),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_quotient_truncates_toward_zero() {
        let kw = arithmetic_keywords().with_noun("toad", -7).with_noun("pair", 2);
        assert_eq!(eval("the quotient between a pig and a pair", &kw).unwrap(), 4);
        assert_eq!(eval("the quotient between a toad and a pair", &kw).unwrap(), -3);
    }

    #[test]
    fn test_adjectives_double() {
        let kw = arithmetic_keywords();
        assert_eq!(eval("the flattering flattering cat", &kw).unwrap(), 4);
        assert_eq!(eval("a flattering pig", &kw).unwrap(), 18);
    }

    #[test]
    fn test_adjective_that_is_also_noun() {
        let kw = arithmetic_keywords().with_adjective("rose");
        assert_eq!(eval("a rose", &kw).unwrap(), 6);
    }

    #[test]
    fn test_character_reference() {
        let kw = arithmetic_keywords();
        let ctx = TestContext::new().with_character("Romeo", 5);

        assert_eq!(evaluate(&words("a flattering Romeo"), 0, &kw, &ctx).unwrap(), 10);
        assert_eq!(
            evaluate(&words("the sum of Romeo and a cat"), 0, &kw, &ctx).unwrap(),
            6
        );
        // 角色名大小写敏感
        assert_eq!(evaluate(&words("romeo"), -1, &kw, &ctx).unwrap(), -1);
    }

    #[test]
    fn test_fallback_when_no_value_word() {
        let kw = arithmetic_keywords();
        let ctx = TestContext::new();
        assert_eq!(evaluate(&words("you are nothing"), 42, &kw, &ctx).unwrap(), 42);
        assert_eq!(evaluate(&[], 7, &kw, &ctx).unwrap(), 7);
    }

    #[test]
    fn test_missing_operand_uses_fallback() {
        let kw = arithmetic_keywords();
        let ctx = TestContext::new();
        // 第二个操作数缺失，回退值参与运算
        assert_eq!(
            evaluate(&words("the sum of a pig and"), 3, &kw, &ctx).unwrap(),
            12
        );
    }

    #[test]
    fn test_operation_followed_by_operation_is_skipped() {
        let kw = arithmetic_keywords();
        // "square" 后紧跟 "root"，只有 root 生效
        assert_eq!(eval("the square root of a pig", &kw).unwrap(), 3);
    }

    #[test]
    fn test_trailing_operation_is_ignored() {
        let kw = arithmetic_keywords();
        let ctx = TestContext::new();
        assert_eq!(evaluate(&words("behold the sum"), 11, &kw, &ctx).unwrap(), 11);
    }

    #[test]
    fn test_nested_operations() {
        let kw = arithmetic_keywords();
        assert_eq!(
            eval("the product of the sum of a cat and a cat and the cube of a cat", &kw).unwrap(),
            2
        );
        assert_eq!(eval("the cube of the sum of a cat and a cat", &kw).unwrap(), 8);
    }

    #[test]
    fn test_root_rules() {
        let kw = arithmetic_keywords().with_noun("toad", -4);
        assert_eq!(eval("the root of a king", &kw).unwrap(), 3);
        assert_eq!(
            eval("the root of a toad", &kw),
            Err(EvalError::NegativeRoot { value: -4 })
        );
    }

    #[test]
    fn test_integer_sqrt_edges() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(15), 3);
        assert_eq!(integer_sqrt(16), 4);
        assert_eq!(integer_sqrt(i64::MAX), 3_037_000_499);
    }

    #[test]
    fn test_operation_table() {
        assert_eq!(Operation::from_name("division"), Some(Operation::Quotient));
        assert_eq!(Operation::from_name("modulo"), None);
        assert_eq!(Operation::Sum.arity(), 2);
        assert_eq!(Operation::Twice.arity(), 1);
        assert_eq!(Operation::Product.apply(&[6, 7]).unwrap(), 42);
        assert_eq!(Operation::Difference.apply(&[3, 10]).unwrap(), -7);
        assert_eq!(Operation::Twice.apply(&[i64::MAX]).unwrap(), -2);
    }
}
