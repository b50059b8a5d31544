// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 文本来源: locales/{ja,en}.yml（rust_i18n::i18n! 宏在 lib.rs 中初始化）
// 约定: 所有翻译都显式传入 locale,不读写 rust-i18n 的全局语言
// 回退: 不支持的语言按日语输出
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["ja", "en"];

/// 默认语言（回退目标）
pub const DEFAULT_LOCALE: &str = "ja";

pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// 规整语言代码: 不支持的语言回退为 DEFAULT_LOCALE
pub fn resolve_locale(locale: &str) -> &str {
    if is_supported(locale) {
        locale
    } else {
        DEFAULT_LOCALE
    }
}

/// 按指定语言取文本
pub fn text(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = resolve_locale(locale)).to_string()
}

/// 按指定语言取文本并填充 `%{name}` 占位符
///
/// # 示例
/// ```no_run
/// use cycle_eye::i18n::text_with_args;
/// let msg = text_with_args("en", "import.file_not_found", &[("path", "/tmp/test.csv")]);
/// ```
pub fn text_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(text(locale, key), |acc, (name, value)| {
        acc.replace(&format!("%{{{}}}", name), value)
    })
}
