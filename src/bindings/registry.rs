//! 绑定注册表
//!
//! 启动时一次性把宿主符号解析为可调用句柄。句柄记录符号名、参数个数
//! 和声明的参数形状；宿主不做类型检查，句柄也不做。

use super::host::Host;
use super::value::{FromRemote, IntoArgs, RemoteValue, ValueKind};
use crate::core::{BindingError, BindingResult, CallError, CallResult};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 已绑定宿主符号的描述，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProcedureBinding {
    pub symbol: String,
    pub arity: usize,
    pub signature: Vec<ValueKind>,
}

struct BoundSymbol {
    host: Arc<dyn Host>,
    namespace: Arc<str>,
    binding: RemoteProcedureBinding,
}

/// 已绑定符号的无类型调用句柄
#[derive(Clone)]
pub struct RawProcedure {
    inner: Arc<BoundSymbol>,
}

impl RawProcedure {
    pub fn binding(&self) -> &RemoteProcedureBinding {
        &self.inner.binding
    }

    pub fn symbol(&self) -> &str {
        &self.inner.binding.symbol
    }

    pub fn arity(&self) -> usize {
        self.inner.binding.arity
    }

    /// 跨边界的阻塞调用
    pub fn invoke(&self, args: Vec<RemoteValue>) -> CallResult<RemoteValue> {
        let inner = &self.inner;
        inner
            .host
            .call(&inner.namespace, &inner.binding.symbol, args)
            .map_err(|e| CallError::Host {
                symbol: inner.binding.symbol.clone(),
                message: e.0,
            })
    }

    /// 调用并转换返回值
    pub fn call_as<R: FromRemote>(&self, args: Vec<RemoteValue>) -> CallResult<R> {
        let value = self.invoke(args)?;
        R::from_remote(value).map_err(|source| CallError::Conversion {
            symbol: self.symbol().to_string(),
            source,
        })
    }
}

impl fmt::Debug for RawProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawProcedure")
            .field("namespace", &self.inner.namespace)
            .field("binding", &self.inner.binding)
            .finish()
    }
}

/// 静态类型句柄：参数 `A`，结果 `R`
pub struct Procedure<A, R> {
    raw: RawProcedure,
    _marker: PhantomData<fn(A) -> R>,
}

impl<A, R> Clone for Procedure<A, R> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            _marker: PhantomData,
        }
    }
}

impl<A, R> fmt::Debug for Procedure<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Procedure").field(&self.raw).finish()
    }
}

impl<A: IntoArgs, R: FromRemote> Procedure<A, R> {
    pub fn call(&self, args: A) -> CallResult<R> {
        self.raw.call_as(args.into_args())
    }

    pub fn raw(&self) -> &RawProcedure {
        &self.raw
    }
}

/// 在宿主上绑定同一命名空间的符号
#[derive(Clone)]
pub struct BindingRegistry {
    host: Arc<dyn Host>,
    namespace: Arc<str>,
}

impl BindingRegistry {
    pub fn new(host: Arc<dyn Host>, namespace: impl Into<String>) -> Self {
        Self {
            host,
            namespace: Arc::from(namespace.into()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    /// 按显式参数签名绑定 `symbol`。
    ///
    /// 宿主未导出的符号视为版本不匹配，报告为 [`BindingError::MissingSymbol`]。
    pub fn bind_raw(
        &self,
        symbol: &str,
        signature: Vec<ValueKind>,
    ) -> BindingResult<RawProcedure> {
        if !self.host.has_function(&self.namespace, symbol) {
            tracing::error!(
                target: "ldapi.binding",
                "Host does not export '{}::{}'",
                self.namespace,
                symbol
            );
            return Err(BindingError::MissingSymbol {
                namespace: self.namespace.to_string(),
                symbol: symbol.to_string(),
            });
        }

        tracing::trace!(target: "ldapi.binding", "Bound {}::{}", self.namespace, symbol);
        Ok(RawProcedure {
            inner: Arc::new(BoundSymbol {
                host: Arc::clone(&self.host),
                namespace: Arc::clone(&self.namespace),
                binding: RemoteProcedureBinding {
                    symbol: symbol.to_string(),
                    arity: signature.len(),
                    signature,
                },
            }),
        })
    }

    /// 按 `A` 的签名绑定 `symbol`
    pub fn bind<A: IntoArgs, R: FromRemote>(&self, symbol: &str) -> BindingResult<Procedure<A, R>> {
        let raw = self.bind_raw(symbol, A::signature())?;
        Ok(Procedure {
            raw,
            _marker: PhantomData,
        })
    }

    /// 开始收集一个领域对象的导入
    pub fn table(&self, name: &'static str) -> ImportTableBuilder<'_> {
        ImportTableBuilder {
            registry: self,
            name,
            bindings: Vec::new(),
        }
    }
}

/// 收集绑定，直到调用 [`freeze`](ImportTableBuilder::freeze)
pub struct ImportTableBuilder<'a> {
    registry: &'a BindingRegistry,
    name: &'static str,
    bindings: Vec<RemoteProcedureBinding>,
}

impl ImportTableBuilder<'_> {
    pub fn import<A: IntoArgs, R: FromRemote>(
        &mut self,
        symbol: &str,
    ) -> BindingResult<Procedure<A, R>> {
        let procedure = self.registry.bind::<A, R>(symbol)?;
        self.bindings.push(procedure.raw().binding().clone());
        Ok(procedure)
    }

    pub fn import_raw(
        &mut self,
        symbol: &str,
        signature: Vec<ValueKind>,
    ) -> BindingResult<RawProcedure> {
        let procedure = self.registry.bind_raw(symbol, signature)?;
        self.bindings.push(procedure.binding().clone());
        Ok(procedure)
    }

    pub fn freeze(self) -> ImportTable {
        tracing::debug!(
            target: "ldapi.binding",
            "Import table '{}' frozen with {} symbol(s)",
            self.name,
            self.bindings.len()
        );
        ImportTable {
            name: self.name,
            bindings: self.bindings,
        }
    }
}

/// 一个领域对象导入的符号的只读记录
#[derive(Debug, Clone)]
pub struct ImportTable {
    name: &'static str,
    bindings: Vec<RemoteProcedureBinding>,
}

impl ImportTable {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&RemoteProcedureBinding> {
        self.bindings.iter().find(|b| b.symbol == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteProcedureBinding> {
        self.bindings.iter()
    }
}
