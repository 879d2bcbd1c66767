//! Locale string tables.
//!
//! The conversion core reports `ConvertError` kinds; everything the user
//! reads comes from here.

use crate::time::ConvertError;

/// Display language. `Auto` follows the `LANG` environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Auto,
    Zh,
    En,
}

impl Lang {
    /// Cycle auto -> zh -> en.
    pub fn next(&self) -> Self {
        match self {
            Lang::Auto => Lang::Zh,
            Lang::Zh => Lang::En,
            Lang::En => Lang::Auto,
        }
    }

    /// Resolve to a concrete choice, consulting the environment for `Auto`.
    pub fn is_zh(&self) -> bool {
        match self {
            Lang::Zh => true,
            Lang::En => false,
            Lang::Auto => std::env::var("LANG")
                .map(|l| l.to_lowercase().starts_with("zh"))
                .unwrap_or(false),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Lang::Auto => "auto",
            Lang::Zh => "中文",
            Lang::En => "English",
        }
    }
}

/// Localized UI strings.
#[derive(Debug, Clone, Copy)]
pub struct Strings {
    pub title: &'static str,
    pub input_label: &'static str,
    pub placeholder: &'static str,
    pub convert: &'static str,
    pub add_tz: &'static str,
    pub remove_tz: &'static str,
    pub select_tz: &'static str,
    pub confirm_title: &'static str,
    pub confirm_yes: &'static str,
    pub confirm_no: &'static str,
    pub add_needs_timestamp: &'static str,
    pub err_timestamp_empty: &'static str,
    pub err_timestamp_nan: &'static str,
    pub err_timestamp_invalid: &'static str,
    pub err_date_format: &'static str,
    pub help_hint: &'static str,
}

const ZH: Strings = Strings {
    title: " 时间戳转换 ",
    input_label: "输入时间戳（秒或毫秒）",
    placeholder: "如 1700000000 或 1700000000000",
    convert: "转换",
    add_tz: "添加时区",
    remove_tz: "删除时区",
    select_tz: "选择时区",
    confirm_title: "删除时区",
    confirm_yes: "确定",
    confirm_no: "取消",
    add_needs_timestamp: "先输入时间戳再添加时区",
    err_timestamp_empty: "请输入时间戳",
    err_timestamp_nan: "不是有效数字",
    err_timestamp_invalid: "无法解析时间",
    err_date_format: "格式应为 YYYY-MM-DD HH:mm:ss",
    help_hint: "回车 转换 | i 编辑时间戳 | e 编辑行 | o 时区 | a 添加 | d 删除 | L 语言 | q 退出",
};

const EN: Strings = Strings {
    title: " Timestamp Converter ",
    input_label: "Enter timestamp (seconds or ms)",
    placeholder: "e.g. 1700000000 or 1700000000000",
    convert: "Convert",
    add_tz: "Add timezone",
    remove_tz: "Remove timezone",
    select_tz: "Select timezone",
    confirm_title: "Remove timezone",
    confirm_yes: "Confirm",
    confirm_no: "Cancel",
    add_needs_timestamp: "Enter a timestamp before adding a timezone",
    err_timestamp_empty: "Please enter a timestamp",
    err_timestamp_nan: "Not a valid number",
    err_timestamp_invalid: "Cannot parse time",
    err_date_format: "Format should be YYYY-MM-DD HH:mm:ss",
    help_hint: "Enter convert | i edit timestamp | e edit row | o timezone | a add | d remove | L lang | q quit",
};

/// Look up the string table for a language.
pub fn strings(lang: Lang) -> &'static Strings {
    if lang.is_zh() {
        &ZH
    } else {
        &EN
    }
}

impl Strings {
    /// Localized message for a conversion failure.
    ///
    /// `RowNotFound` is an internal staleness signal and never reaches the
    /// user; callers treat it as a no-op before rendering.
    pub fn convert_error(&self, err: ConvertError) -> &'static str {
        match err {
            ConvertError::EmptyInput => self.err_timestamp_empty,
            ConvertError::NotANumber => self.err_timestamp_nan,
            ConvertError::UnparseableTime => self.err_timestamp_invalid,
            ConvertError::BadDateFormat => self.err_date_format,
            ConvertError::RowNotFound => self.err_timestamp_invalid,
        }
    }

    /// Confirmation prompt for removing the named timezone row.
    pub fn confirm_remove(&self, label: &str, zh: bool) -> String {
        if zh {
            format!("确定删除 {label} 时区吗？")
        } else {
            format!("Remove timezone {label}?")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DATE_FORMAT_HELP;

    #[test]
    fn test_lang_cycle() {
        assert_eq!(Lang::Auto.next(), Lang::Zh);
        assert_eq!(Lang::Zh.next(), Lang::En);
        assert_eq!(Lang::En.next(), Lang::Auto);
    }

    #[test]
    fn test_error_messages_match_kind() {
        let s = strings(Lang::En);
        assert_eq!(s.convert_error(ConvertError::EmptyInput), "Please enter a timestamp");
        assert!(s.convert_error(ConvertError::BadDateFormat).contains(DATE_FORMAT_HELP));
        let s = strings(Lang::Zh);
        assert_eq!(s.convert_error(ConvertError::NotANumber), "不是有效数字");
    }
}
