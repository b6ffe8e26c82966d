//! 客户端入口
//!
//! `LdApi::connect` 对每个导入表只绑定一次。宿主缺少任一符号即为版本不匹配，
//! 连接在第一个缺失符号处失败，不会把错误拖到首次调用。

use crate::bindings::{BindingRegistry, Host, ImportTable};
use crate::config::ClientConfig;
use crate::core::{logging, LdApiResult};
use crate::events::{ListenerRegistry, EVENT_SYMBOLS};
use crate::land::{
    AabbService, Land, LandId, LandRegistryService, LandSymbols, RegistrySymbols, AABB_SYMBOLS,
    LAND_SYMBOLS, REGISTRY_SYMBOLS,
};
use std::sync::Arc;

/// `connect` 绑定的全部符号，按绑定顺序
pub fn required_symbols() -> impl Iterator<Item = &'static str> {
    LAND_SYMBOLS
        .iter()
        .chain(REGISTRY_SYMBOLS)
        .chain(AABB_SYMBOLS)
        .chain(EVENT_SYMBOLS)
        .copied()
}

/// 已连接的客户端
pub struct LdApi {
    config: ClientConfig,
    registry: LandRegistryService,
    aabb: AabbService,
    events: ListenerRegistry,
    lands: Arc<LandSymbols>,
    registry_symbols: Arc<RegistrySymbols>,
}

impl LdApi {
    pub fn connect(host: Arc<dyn Host>, config: ClientConfig) -> LdApiResult<Self> {
        config.validate()?;
        if config.logging.init {
            logging::init(&config.logging);
        }

        let bindings = BindingRegistry::new(host, config.namespace.clone());
        let lands = Arc::new(LandSymbols::bind(&bindings)?);
        let registry_symbols = Arc::new(RegistrySymbols::bind(&bindings)?);
        let aabb = AabbService::bind(&bindings)?;
        let events = ListenerRegistry::bind(&bindings)?;

        let client = Self {
            registry: LandRegistryService::new(Arc::clone(&registry_symbols), Arc::clone(&lands)),
            config,
            aabb,
            events,
            lands,
            registry_symbols,
        };
        tracing::info!(
            target: "ldapi.client",
            "Connected to '{}' ({} symbols)",
            client.namespace(),
            client.tables().iter().map(|t| t.len()).sum::<usize>()
        );
        Ok(client)
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn registry(&self) -> &LandRegistryService {
        &self.registry
    }

    pub fn aabb(&self) -> &AabbService {
        &self.aabb
    }

    pub fn events(&self) -> &ListenerRegistry {
        &self.events
    }

    /// `id` 对应的句柄；不检查领地是否存在
    pub fn land(&self, id: LandId) -> Land {
        Land::new(id, Arc::clone(&self.lands))
    }

    /// 已冻结的导入表，每个领域对象一张
    pub fn tables(&self) -> [&ImportTable; 4] {
        [
            self.lands.imports(),
            self.registry_symbols.imports(),
            self.aabb.imports(),
            self.events.imports(),
        ]
    }
}
