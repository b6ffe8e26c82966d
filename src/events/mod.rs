//! 事件监听注册表
//!
//! 注册流程：
//! 1. 调用 `ScriptEventManager_genListenerID` 向宿主申请键名 `"{namespace}_Event_{n}"`，
//!    计数器在宿主进程内共享，所有使用者的键名互不相同
//! 2. 以 `(事件名, 键名)` 导出回调，供宿主反向调用
//! 3. 调用 `Event_RegisterListener(事件名, 键名)`，宿主返回 `false` 视为注册失败
//!
//! 注册只增不减，目前没有注销接口。回调只会在宿主的事件循环中被调用。

pub mod catalog;

pub use catalog::*;

use crate::bindings::{BindingRegistry, Host, HostFunction, ImportTable, Procedure, RemoteValue};
use crate::core::{BindingResult, ListenerError};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// 宿主导出的事件相关符号
pub const EVENT_SYMBOLS: &[&str] = &["ScriptEventManager_genListenerID", "Event_RegisterListener"];

/// 监听器的处理结果，只在边界上转换为布尔值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// 放行
    Allow,
    /// 拦截（仅对可取消的事件生效）
    Deny,
}

impl Decision {
    pub fn is_allow(self) -> bool {
        self == Decision::Allow
    }
}

impl From<bool> for Decision {
    fn from(allow: bool) -> Self {
        if allow {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.is_allow()
    }
}

/// 宿主分配的监听器 ID，即导出回调时使用的键名
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(String);

impl ListenerId {
    pub fn key(&self) -> &str {
        &self.0
    }

    /// 键名末尾的序号；宿主返回的键名不符合 `"{namespace}_Event_{n}"` 时为 `None`
    pub fn sequence(&self) -> Option<u64> {
        self.0.rsplit_once("_Event_")?.1.parse().ok()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一次成功的注册
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerRegistration {
    pub id: ListenerId,
    pub event: EventKind,
}

pub struct ListenerRegistry {
    host: Arc<dyn Host>,
    gen_listener_id: Procedure<(), String>,
    register_listener: Procedure<(String, String), bool>,
    registrations: Mutex<Vec<ListenerRegistration>>,
    imports: ImportTable,
}

impl ListenerRegistry {
    pub fn bind(registry: &BindingRegistry) -> BindingResult<Self> {
        let mut table = registry.table("LDEvent");
        let gen_listener_id = table.import("ScriptEventManager_genListenerID")?;
        let register_listener = table.import("Event_RegisterListener")?;
        Ok(Self {
            host: Arc::clone(registry.host()),
            gen_listener_id,
            register_listener,
            registrations: Mutex::new(Vec::new()),
            imports: table.freeze(),
        })
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    /// 监听强类型事件
    ///
    /// 宿主传来的参数无法解码时记录错误并放行，与宿主对待抛出异常的监听器的方式一致。
    pub fn listen<E, F>(&self, callback: F) -> Result<ListenerId, ListenerError>
    where
        E: LandEvent,
        F: Fn(E) -> Decision + Send + Sync + 'static,
    {
        self.listen_raw(E::KIND, move |args| match E::from_args(args) {
            Ok(event) => callback(event),
            Err(e) => {
                tracing::error!(
                    target: "ldapi.events",
                    "Malformed arguments for {}: {}",
                    E::KIND,
                    e
                );
                Decision::Allow
            }
        })
    }

    /// 监听事件，回调直接接收宿主传来的参数
    pub fn listen_raw<F>(&self, kind: EventKind, callback: F) -> Result<ListenerId, ListenerError>
    where
        F: Fn(Vec<RemoteValue>) -> Decision + Send + Sync + 'static,
    {
        let key = self.gen_listener_id.call(())?;
        let event = kind.name();

        let trampoline: HostFunction =
            Arc::new(move |args| Ok(RemoteValue::Bool(callback(args).into())));
        if !self.host.export(event, &key, trampoline) {
            return Err(ListenerError::Export {
                event: event.to_string(),
                key,
            });
        }

        let accepted = self
            .register_listener
            .call((event.to_string(), key.clone()))?;
        if !accepted {
            tracing::error!(target: "ldapi.events", "Host rejected listener {} for {}", key, event);
            return Err(ListenerError::Rejected {
                event: event.to_string(),
            });
        }

        tracing::debug!(target: "ldapi.events", "Listening to {} as {}", event, key);
        let id = ListenerId(key);
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ListenerRegistration {
                id: id.clone(),
                event: kind,
            });
        Ok(id)
    }

    pub fn registrations(&self) -> Vec<ListenerRegistration> {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
