//! 核心宏定义
//!
//! 提供统一的宏来减少代码重复

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use pland_ldapi::impl_default;
///
/// struct Retry {
///     attempts: u32,
///     label: String,
/// }
///
/// impl_default!(Retry {
///     attempts: 3,
///     label: String::from("retry"),
/// });
///
/// assert_eq!(Retry::default().attempts, 3);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
