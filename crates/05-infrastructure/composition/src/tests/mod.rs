//! 内核组合层测试
