//! # 词典目录加载集成测试
//!
//! 在临时目录中写入 `.kws` 文件，验证加载结果能驱动整个解释流程。

use std::fs;
use std::path::Path;

use spl_cli::{CliConfig, load_keywords_dir};
use spl_runtime::{KeywordError, KeywordSources, run};
use tempfile::TempDir;

/// 用法语单词写一套最小词典
fn write_french_dictionary(dir: &Path) {
    let files = [
        ("outputs", "parle 1 esprit 1 ouvre 2 coeur 2"),
        ("inputs", "ouvre 1 esprit 1 ecoute 2 ton 2"),
        ("operations", "sum 2 twice 1"),
        ("nouns", "rose 1 cochon -1 rien 0"),
        ("adjectives", "belle 1 grande 1"),
        ("personalnouns", "tu 1 toi 1"),
    ];
    for (stem, text) in files {
        fs::write(dir.join(format!("{stem}.kws")), text).unwrap();
    }
}

#[test]
fn test_file_stems_match_written_files() {
    let temp = TempDir::new().unwrap();
    write_french_dictionary(temp.path());

    for stem in KeywordSources::FILE_STEMS {
        assert!(temp.path().join(format!("{stem}.kws")).is_file(), "{stem}");
    }
}

#[test]
fn test_load_dictionary_dir() {
    let temp = TempDir::new().unwrap();
    write_french_dictionary(temp.path());

    let keywords = load_keywords_dir(temp.path()).unwrap();
    assert_eq!(keywords.noun_value("cochon"), Some(-1));
    assert_eq!(keywords.noun_value("pig"), None);
    assert!(keywords.is_adjective("belle"));
    assert!(keywords.is_personal_noun("tu"));
    assert_eq!(keywords.output_class("parle"), 1);
    assert_eq!(keywords.input_class("ecoute"), 2);
    assert!(keywords.operation("sum").is_some());
    assert!(keywords.operation("square").is_none());
}

#[test]
fn test_loaded_dictionary_runs_program() {
    let temp = TempDir::new().unwrap();
    write_french_dictionary(temp.path());
    let keywords = load_keywords_dir(temp.path()).unwrap();

    let text = "\
Titre.
Romeo, un homme.
Juliet, une femme.
Act I: Un.
Scene I: Seule.
[Enter Romeo and Juliet]
Juliet: Tu es la sum of une belle rose and une rose. Ouvre ton coeur!
";
    let output = run(text, &keywords).unwrap();
    assert_eq!(output, b"3");
}

#[test]
fn test_missing_file_is_empty() {
    let temp = TempDir::new().unwrap();
    write_french_dictionary(temp.path());
    fs::remove_file(temp.path().join("adjectives.kws")).unwrap();

    let keywords = load_keywords_dir(temp.path()).unwrap();
    assert!(!keywords.is_adjective("belle"));
    assert_eq!(keywords.noun_value("rose"), Some(1));
}

#[test]
fn test_missing_dir_is_error() {
    let temp = TempDir::new().unwrap();
    let err = load_keywords_dir(&temp.path().join("absent")).unwrap_err();
    assert!(err.to_string().contains("absent"));
}

#[test]
fn test_invalid_operation_arity() {
    let temp = TempDir::new().unwrap();
    write_french_dictionary(temp.path());
    fs::write(temp.path().join("operations.kws"), "sum 1").unwrap();

    let err = load_keywords_dir(temp.path()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<KeywordError>(),
        Some(&KeywordError::ArityMismatch {
            word: "sum".to_string(),
            expected: 2,
            actual: 1,
        })
    );
}

#[test]
fn test_config_file_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("spl.json");
    fs::write(&path, r#"{ "keywords_dir": "dict", "verbose": 1 }"#).unwrap();

    let config = CliConfig::load(&path).unwrap();
    assert_eq!(config.keywords_dir.as_deref(), Some(Path::new("dict")));
    assert_eq!(config.verbose, 1);

    fs::write(&path, "not json").unwrap();
    assert!(CliConfig::load(&path).is_err());
}

#[test]
fn test_unread_files_are_ignored() {
    let temp = TempDir::new().unwrap();
    write_french_dictionary(temp.path());
    // 不在词典文件列表中的文件不会被读取，内容无效也不影响加载
    fs::write(temp.path().join("personaladjectives.kws"), "ton beaucoup").unwrap();
    fs::write(temp.path().join("notes.kws"), "???").unwrap();

    assert!(!KeywordSources::FILE_STEMS.contains(&"personaladjectives"));
    let keywords = load_keywords_dir(temp.path()).unwrap();
    assert_eq!(keywords.noun_value("rose"), Some(1));
}
