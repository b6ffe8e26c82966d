//! 重载分派
//!
//! 一个逻辑操作对应多个宿主符号。每个候选声明参数个数和形状谓词，
//! 按声明顺序第一个匹配实参的候选胜出。解析只取决于实参形状，
//! 没有候选接受的调用在跨越边界之前就失败。

use super::registry::RawProcedure;
use super::value::{FromRemote, RemoteValue, ValueKind};
use crate::core::{
    BindingError, BindingResult, CallError, CallResult, DispatchError, LdApiResult,
    MismatchReason,
};
use std::fmt;
use std::sync::Arc;

type ShapeFn = Arc<dyn Fn(&[RemoteValue]) -> bool + Send + Sync>;

/// 候选识别实参的方式
#[derive(Clone)]
pub enum ArgPredicate {
    /// 每个参数一个形状
    Kinds(Vec<ValueKind>),
    Custom(ShapeFn),
}

impl ArgPredicate {
    fn accepts(&self, args: &[RemoteValue]) -> bool {
        match self {
            ArgPredicate::Kinds(kinds) => kinds
                .iter()
                .zip(args)
                .all(|(kind, arg)| kind.accepts(arg)),
            ArgPredicate::Custom(f) => f(args),
        }
    }
}

impl fmt::Debug for ArgPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgPredicate::Kinds(kinds) => f.debug_tuple("Kinds").field(kinds).finish(),
            ArgPredicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// 重载操作的一个候选
#[derive(Debug, Clone)]
pub struct Overload {
    label: &'static str,
    arity: usize,
    predicate: ArgPredicate,
    target: RawProcedure,
    defaults: Vec<RemoteValue>,
}

impl Overload {
    pub fn kinds(label: &'static str, kinds: Vec<ValueKind>, target: RawProcedure) -> Self {
        Self {
            label,
            arity: kinds.len(),
            predicate: ArgPredicate::Kinds(kinds),
            target,
            defaults: Vec::new(),
        }
    }

    pub fn custom<F>(label: &'static str, arity: usize, predicate: F, target: RawProcedure) -> Self
    where
        F: Fn(&[RemoteValue]) -> bool + Send + Sync + 'static,
    {
        Self {
            label,
            arity,
            predicate: ArgPredicate::Custom(Arc::new(predicate)),
            target,
            defaults: Vec::new(),
        }
    }

    /// 追加一个默认参数，调用目标时放在收到的实参之后
    pub fn with_default(mut self, value: impl Into<RemoteValue>) -> Self {
        self.defaults.push(value.into());
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn target(&self) -> &RawProcedure {
        &self.target
    }

    fn matches(&self, args: &[RemoteValue]) -> bool {
        args.len() == self.arity && self.predicate.accepts(args)
    }
}

/// 分派调用的结果，标注处理它的候选
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub label: &'static str,
    pub symbol: String,
    pub value: RemoteValue,
}

impl Dispatched {
    pub fn convert<R: FromRemote>(self) -> CallResult<R> {
        let symbol = self.symbol;
        R::from_remote(self.value).map_err(|source| CallError::Conversion { symbol, source })
    }
}

pub struct OverloadSetBuilder {
    operation: &'static str,
    overloads: Vec<Overload>,
}

impl OverloadSetBuilder {
    pub fn overload(mut self, overload: Overload) -> Self {
        self.overloads.push(overload);
        self
    }

    /// 检查每个候选与目标的参数个数，并固定顺序
    pub fn build(self) -> BindingResult<OverloadSet> {
        for overload in &self.overloads {
            let supplied = overload.arity + overload.defaults.len();
            if supplied != overload.target.arity() {
                return Err(BindingError::SignatureMismatch {
                    label: overload.label,
                    symbol: overload.target.symbol().to_string(),
                    expected: overload.target.arity(),
                    supplied,
                });
            }
        }
        Ok(OverloadSet {
            operation: self.operation,
            overloads: self.overloads,
        })
    }
}

/// 一个操作的有序候选列表，创建后不可变
#[derive(Debug, Clone)]
pub struct OverloadSet {
    operation: &'static str,
    overloads: Vec<Overload>,
}

impl OverloadSet {
    pub fn builder(operation: &'static str) -> OverloadSetBuilder {
        OverloadSetBuilder {
            operation,
            overloads: Vec::new(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn overloads(&self) -> &[Overload] {
        &self.overloads
    }

    /// 按声明顺序第一个接受 `args` 的候选
    pub fn resolve(&self, args: &[RemoteValue]) -> Result<&Overload, DispatchError> {
        if let Some(overload) = self.overloads.iter().find(|o| o.matches(args)) {
            return Ok(overload);
        }

        let reason = if self.overloads.iter().any(|o| o.arity == args.len()) {
            MismatchReason::NoShape {
                found: args.iter().map(RemoteValue::kind).collect(),
            }
        } else {
            MismatchReason::NoArity { found: args.len() }
        };
        tracing::warn!(target: "ldapi.dispatch", "{}: {}", self.operation, reason);
        Err(DispatchError::InvalidArguments {
            operation: self.operation,
            reason,
        })
    }

    /// 解析并调用胜出的候选，参数为收到的实参加上其默认参数
    pub fn dispatch(&self, mut args: Vec<RemoteValue>) -> LdApiResult<Dispatched> {
        let overload = self.resolve(&args)?;
        tracing::trace!(
            target: "ldapi.dispatch",
            "{} -> {} ({})",
            self.operation,
            overload.label,
            overload.target.symbol()
        );
        args.extend(overload.defaults.iter().cloned());
        let value = overload.target.invoke(args)?;
        Ok(Dispatched {
            label: overload.label,
            symbol: overload.target.symbol().to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::{BindingRegistry, IntPos, LocalHost};
    use crate::core::LdApiError;

    fn echo_registry() -> BindingRegistry {
        let host = LocalHost::new();
        for name in ["all", "by_dim", "by_owner", "by_name"] {
            host.register("ns", name, move |args| {
                let mut out = vec![RemoteValue::from(name)];
                out.extend(args);
                Ok(RemoteValue::Array(out))
            });
        }
        BindingRegistry::new(std::sync::Arc::new(host), "ns")
    }

    fn set(registry: &BindingRegistry) -> OverloadSet {
        let all = registry.bind_raw("all", vec![]).unwrap();
        let by_dim = registry.bind_raw("by_dim", vec![ValueKind::Number]).unwrap();
        let by_owner = registry
            .bind_raw("by_owner", vec![ValueKind::String, ValueKind::Bool])
            .unwrap();
        let by_name = registry.bind_raw("by_name", vec![ValueKind::String]).unwrap();

        OverloadSet::builder("test.get")
            .overload(Overload::kinds("all", vec![], all))
            .overload(Overload::kinds("dim", vec![ValueKind::Number], by_dim))
            .overload(Overload::kinds("owner", vec![ValueKind::String], by_owner).with_default(false))
            .overload(Overload::kinds("name", vec![ValueKind::String], by_name))
            .build()
            .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let registry = echo_registry();
        let set = set(&registry);

        assert_eq!(set.resolve(&[]).unwrap().label(), "all");
        assert_eq!(set.resolve(&[RemoteValue::Float(1.0)]).unwrap().label(), "dim");
        // 形状相同，先声明的 "owner" 遮蔽 "name"
        assert_eq!(set.resolve(&[RemoteValue::from("x")]).unwrap().label(), "owner");
    }

    #[test]
    fn test_dispatch_appends_defaults() {
        let registry = echo_registry();
        let set = set(&registry);

        let out = set.dispatch(vec![RemoteValue::from("uuid")]).unwrap();
        assert_eq!(out.label, "owner");
        assert_eq!(out.symbol, "by_owner");
        assert_eq!(
            out.value,
            RemoteValue::Array(vec![
                RemoteValue::from("by_owner"),
                RemoteValue::from("uuid"),
                RemoteValue::Bool(false)
            ])
        );
    }

    #[test]
    fn test_no_overload() {
        let registry = echo_registry();
        let set = set(&registry);

        let err = set.resolve(&[RemoteValue::Bool(true)]).unwrap_err();
        assert_eq!(
            err,
            DispatchError::InvalidArguments {
                operation: "test.get",
                reason: MismatchReason::NoShape {
                    found: vec![ValueKind::Bool]
                }
            }
        );

        let args = vec![RemoteValue::Null, RemoteValue::Null, RemoteValue::Null];
        match set.dispatch(args) {
            Err(LdApiError::Dispatch(DispatchError::InvalidArguments { reason, .. })) => {
                assert_eq!(reason, MismatchReason::NoArity { found: 3 })
            }
            other => panic!("Expected dispatch error, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_predicate() {
        let registry = echo_registry();
        let by_dim = registry.bind_raw("by_dim", vec![ValueKind::Pos]).unwrap();
        let set = OverloadSet::builder("test.overworld")
            .overload(Overload::custom(
                "overworld",
                1,
                |args| matches!(args[0].as_pos(), Some(p) if p.dimid == 0),
                by_dim,
            ))
            .build()
            .unwrap();

        assert!(set.resolve(&[IntPos::new(0, 0, 0, 0).into()]).is_ok());
        assert!(set.resolve(&[IntPos::new(0, 0, 0, 1).into()]).is_err());
    }

    #[test]
    fn test_build_rejects_arity_mismatch() {
        let registry = echo_registry();
        let by_owner = registry
            .bind_raw("by_owner", vec![ValueKind::String, ValueKind::Bool])
            .unwrap();
        let err = OverloadSet::builder("test.bad")
            .overload(Overload::kinds("owner", vec![ValueKind::String], by_owner))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BindingError::SignatureMismatch {
                label: "owner",
                symbol: "by_owner".to_string(),
                expected: 2,
                supplied: 1
            }
        );
    }

    #[test]
    fn test_dispatched_convert() {
        let dispatched = Dispatched {
            label: "all",
            symbol: "all".to_string(),
            value: RemoteValue::Array(vec![RemoteValue::Int(1)]),
        };
        assert_eq!(dispatched.clone().convert::<Vec<i64>>().unwrap(), vec![1]);
        assert!(matches!(
            dispatched.convert::<String>(),
            Err(CallError::Conversion { .. })
        ));
    }
}
