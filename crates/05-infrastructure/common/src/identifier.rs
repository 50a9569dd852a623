//! 标识符定义
//!
//! 绑定注册表以标识符为键。标识符可以是类型名（[`Identifier::of`]），
//! 也可以是任意字符串标签（例如 `"abc"`）。

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::ops::Deref;

/// 绑定与解析使用的标识符
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Cow<'static, str>);

impl Identifier {
    /// 从任意字符串创建标识符
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// 从静态字符串创建标识符
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// 从类型获取标识符（使用完整类型路径）
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<T>()))
    }

    /// 获取字符串形式
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 获取简短名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        let name = self.0.split('<').next().unwrap_or(&self.0);
        name.rsplit("::")
            .next()
            .and_then(|segment| segment.rsplit('\\').next())
            .unwrap_or(name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Identifier {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&Identifier> for Identifier {
    fn from(id: &Identifier) -> Self {
        id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct SampleService;

    #[test]
    fn test_identifier_of_type() {
        let id = Identifier::of::<SampleService>();
        assert!(id.as_str().ends_with("SampleService"));
        assert_eq!(id.short_name(), "SampleService");
    }

    #[test]
    fn test_short_name_of_tags() {
        assert_eq!(Identifier::from("abc").short_name(), "abc");
        assert_eq!(Identifier::from(r"Foo\Bar\Invalid").short_name(), "Invalid");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Identifier::from(String::from("cde")), 1);
        assert_eq!(map.get("cde"), Some(&1));
    }
}
