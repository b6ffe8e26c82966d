//! In-memory stand-in for the PLand host, used by unit tests.
//!
//! Every symbol the client binds is registered on a `LocalHost`. Land state is
//! kept in a `World` behind a mutex, and missing lands answer with the same
//! neutral values the real host uses (`-1`, empty text, empty lists).

use crate::bindings::{FloatPos, FromRemote, Host, IntPos, LocalHost, RemoteValue};
use crate::core::HostError;
use crate::events::EventKind;
use crate::land::{LandId, LandPermTable, PlayerSettings};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub(crate) const NAMESPACE: &str = "PLand_LDAPI";

#[derive(Debug, Clone)]
struct FakeLand {
    min: IntPos,
    max: IntPos,
    is_3d: bool,
    owner: String,
    members: Vec<String>,
    name: String,
    price: i64,
    teleport: IntPos,
    perm_table: String,
    parent: Option<i64>,
    subs: Vec<i64>,
    dirty: bool,
}

impl FakeLand {
    fn new(min: IntPos, max: IntPos, is_3d: bool, owner: &str) -> Self {
        let (min, max) = fixed(min, max);
        Self {
            min,
            max,
            is_3d,
            owner: owner.to_string(),
            members: Vec::new(),
            name: "Unnamed".to_string(),
            price: 0,
            teleport: min,
            perm_table: LandPermTable::default().to_json().unwrap(),
            parent: None,
            subs: Vec::new(),
            dirty: false,
        }
    }

    fn type_code(&self) -> i64 {
        match (self.parent.is_some(), !self.subs.is_empty()) {
            (false, false) => 0,
            (false, true) => 1,
            (true, true) => 2,
            (true, false) => 3,
        }
    }

    fn collides(&self, min: IntPos, max: IntPos) -> bool {
        min.dimid == self.min.dimid && overlaps(self.min, self.max, min, max, self.is_3d)
    }
}

#[derive(Default)]
struct World {
    lands: BTreeMap<i64, FakeLand>,
    next_id: i64,
    operators: Vec<String>,
    listeners: Vec<(String, String)>,
    listener_count: u64,
    reject_listeners: bool,
    refreshed: Vec<i64>,
}

impl World {
    fn insert(&mut self, land: FakeLand) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.lands.insert(id, land);
        id
    }

    fn nested_level(&self, id: i64) -> i64 {
        let mut level = 0;
        let mut current = self.lands.get(&id).and_then(|l| l.parent);
        while let Some(parent) = current {
            level += 1;
            current = self.lands.get(&parent).and_then(|l| l.parent);
        }
        level
    }

    fn ids_where(&self, pred: impl Fn(&FakeLand) -> bool) -> RemoteValue {
        RemoteValue::from(
            self.lands
                .iter()
                .filter(|(_, land)| pred(land))
                .map(|(id, _)| *id)
                .collect::<Vec<_>>(),
        )
    }
}

type Handler = dyn Fn(&mut World, &[RemoteValue]) -> Result<RemoteValue, HostError> + Send + Sync;

pub(crate) struct FakePland {
    host: Arc<LocalHost>,
    world: Arc<Mutex<World>>,
}

pub(crate) fn fake_host() -> Arc<LocalHost> {
    FakePland::new().host()
}

impl FakePland {
    pub(crate) fn new() -> Self {
        let fake = Self {
            host: Arc::new(LocalHost::new()),
            world: Arc::new(Mutex::new(World {
                next_id: 1,
                ..World::default()
            })),
        };
        fake.install_aabb();
        fake.install_land();
        fake.install_registry();
        fake.install_events();
        fake
    }

    pub(crate) fn host(&self) -> Arc<LocalHost> {
        Arc::clone(&self.host)
    }

    pub(crate) fn seed_land(&self, min: IntPos, max: IntPos, owner: &str) -> LandId {
        let mut world = self.world.lock().unwrap();
        LandId(world.insert(FakeLand::new(min, max, false, owner)))
    }

    pub(crate) fn seed_sub_land(&self, parent: LandId, min: IntPos, max: IntPos) -> LandId {
        let mut world = self.world.lock().unwrap();
        let owner = world.lands[&parent.0].owner.clone();
        let mut land = FakeLand::new(min, max, true, &owner);
        land.parent = Some(parent.0);
        let id = world.insert(land);
        world.lands.get_mut(&parent.0).unwrap().subs.push(id);
        LandId(id)
    }

    pub(crate) fn reject_listeners(&self, reject: bool) {
        self.world.lock().unwrap().reject_listeners = reject;
    }

    pub(crate) fn refreshed(&self) -> Vec<i64> {
        self.world.lock().unwrap().refreshed.clone()
    }

    /// Call every listener registered for `event`, the way the host's event
    /// loop does, and collect the answers.
    pub(crate) fn fire(&self, event: &str, args: Vec<RemoteValue>) -> Vec<bool> {
        let keys: Vec<String> = self
            .world
            .lock()
            .unwrap()
            .listeners
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, key)| key.clone())
            .collect();
        keys.iter()
            .map(|key| {
                self.host
                    .call(event, key, args.clone())
                    .unwrap()
                    .as_bool()
                    .unwrap()
            })
            .collect()
    }

    fn expose<F>(&self, name: &'static str, handler: F)
    where
        F: Fn(&mut World, &[RemoteValue]) -> Result<RemoteValue, HostError> + Send + Sync + 'static,
    {
        let world = Arc::clone(&self.world);
        let handler: Box<Handler> = Box::new(handler);
        self.host.register(NAMESPACE, name, move |args| {
            let mut world = world.lock().unwrap();
            handler(&mut world, &args)
        });
    }

    /// Land accessor: `missing` is returned when the id is unknown
    fn on_land<F>(&self, name: &'static str, missing: impl Into<RemoteValue>, f: F)
    where
        F: Fn(&mut FakeLand, &[RemoteValue]) -> Result<RemoteValue, HostError> + Send + Sync + 'static,
    {
        let missing = missing.into();
        self.expose(name, move |world, args| {
            let id: i64 = arg(args, 0)?;
            match world.lands.get_mut(&id) {
                Some(land) => f(land, args),
                None => Ok(missing.clone()),
            }
        });
    }

    fn install_aabb(&self) {
        let host = &self.host;
        let pair = |args: &[RemoteValue]| -> Result<(IntPos, IntPos), HostError> {
            Ok(fixed(arg(args, 0)?, arg(args, 1)?))
        };

        host.register(NAMESPACE, "LandAABB_fix", move |args| {
            let (a, b): (IntPos, IntPos) = (arg(&args, 0)?, arg(&args, 1)?);
            let (mut min, mut max) = fixed(a, b);
            min.dimid = a.dimid;
            max.dimid = b.dimid;
            Ok(vec![min, max].into())
        });
        host.register(NAMESPACE, "LandAABB_getSpanX", move |args| {
            let (min, max) = pair(&args)?;
            Ok(RemoteValue::Int(span(min.x, max.x)))
        });
        host.register(NAMESPACE, "LandAABB_getSpanY", move |args| {
            let (min, max) = pair(&args)?;
            Ok(RemoteValue::Int(span(min.y, max.y)))
        });
        host.register(NAMESPACE, "LandAABB_getSpanZ", move |args| {
            let (min, max) = pair(&args)?;
            Ok(RemoteValue::Int(span(min.z, max.z)))
        });
        host.register(NAMESPACE, "LandAABB_getSquare", move |args| {
            let (min, max) = pair(&args)?;
            Ok(RemoteValue::Int(span(min.x, max.x) * span(min.z, max.z)))
        });
        host.register(NAMESPACE, "LandAABB_getVolume", move |args| {
            let (min, max) = pair(&args)?;
            Ok(RemoteValue::Int(
                span(min.x, max.x) * span(min.y, max.y) * span(min.z, max.z),
            ))
        });
        host.register(NAMESPACE, "LandAABB_toString", move |args| {
            let (min, max) = pair(&args)?;
            Ok(format!(
                "({},{},{}) => ({},{},{})",
                min.x, min.y, min.z, max.x, max.y, max.z
            )
            .into())
        });
        host.register(NAMESPACE, "LandAABB_getBorder", move |args| {
            let (min, max) = pair(&args)?;
            Ok(box_corners(min, max).into())
        });
        host.register(NAMESPACE, "LandAABB_getRange", move |args| {
            let (min, max) = pair(&args)?;
            let flat: Vec<IntPos> = box_corners(min, max)
                .into_iter()
                .filter(|p| p.y == min.y)
                .collect();
            Ok(flat.into())
        });
        for name in ["LandAABB_getVertices", "LandAABB_getCorners"] {
            host.register(NAMESPACE, name, move |args| {
                let (min, max) = pair(&args)?;
                let points: Vec<FloatPos> = box_corners(min, max)
                    .into_iter()
                    .map(|p| FloatPos::new(p.x as f64, p.y as f64, p.z as f64, p.dimid))
                    .collect();
                Ok(points.into())
            });
        }
        host.register(NAMESPACE, "LandAABB_getEdges", move |args| {
            let (min, max) = pair(&args)?;
            let corners = box_corners(min, max);
            let mut edges = Vec::new();
            for (i, a) in corners.iter().enumerate() {
                for b in &corners[i + 1..] {
                    let same = [a.x == b.x, a.y == b.y, a.z == b.z];
                    if same.iter().filter(|s| **s).count() == 2 {
                        edges.push(RemoteValue::from(vec![*a, *b]));
                    }
                }
            }
            Ok(RemoteValue::Array(edges))
        });
        host.register(NAMESPACE, "LandAABB_hasPos", move |args| {
            let (min, max) = pair(&args)?;
            let pos: IntPos = arg(&args, 2)?;
            let include_y: bool = arg(&args, 3)?;
            Ok(contains_pos(min, max, pos, include_y).into())
        });
        host.register(NAMESPACE, "LandAABB_isCollision", move |args| {
            let (a_min, a_max) = pair(&args)?;
            let (b_min, b_max) = pair(&args[2..])?;
            Ok(overlaps(a_min, a_max, b_min, b_max, true).into())
        });
        host.register(NAMESPACE, "LandAABB_isComplisWithMinSpacing", move |args| {
            let (a_min, a_max) = pair(&args)?;
            let (b_min, b_max) = pair(&args[2..])?;
            let spacing = arg::<i64>(&args, 4)? as i32;
            let include_y: bool = arg(&args, 5)?;
            let gap = |a0: i32, a1: i32, b0: i32, b1: i32| (b0 - a1).max(a0 - b1);
            let mut gaps = vec![
                gap(a_min.x, a_max.x, b_min.x, b_max.x),
                gap(a_min.z, a_max.z, b_min.z, b_max.z),
            ];
            if include_y {
                gaps.push(gap(a_min.y, a_max.y, b_min.y, b_max.y));
            }
            Ok(gaps.into_iter().any(|g| g >= spacing).into())
        });
        host.register(NAMESPACE, "LandAABB_isContain", move |args| {
            let (a_min, a_max) = pair(&args)?;
            let (b_min, b_max) = pair(&args[2..])?;
            Ok((contains_pos(a_min, a_max, b_min, true) && contains_pos(a_min, a_max, b_max, true))
                .into())
        });
    }

    fn install_land(&self) {
        self.on_land("Land_getAABB", Vec::<IntPos>::new(), |land, _| {
            Ok(vec![land.min, land.max].into())
        });
        self.on_land("Land_getTeleportPos", IntPos::default(), |land, _| {
            Ok(land.teleport.into())
        });
        self.on_land("Land_setTeleportPos", (), |land, args| {
            land.teleport = arg(args, 1)?;
            land.dirty = true;
            Ok(RemoteValue::Null)
        });
        self.expose("Land_getId", |world, args| {
            let id: i64 = arg(args, 0)?;
            Ok(RemoteValue::Int(if world.lands.contains_key(&id) { id } else { -1 }))
        });
        self.on_land("Land_getDimensionId", -1, |land, _| Ok(land.min.dimid.into()));
        self.on_land("Land_getPermTable", "", |land, _| Ok(land.perm_table.clone().into()));
        self.on_land("Land_setPermTable", (), |land, args| {
            land.perm_table = arg(args, 1)?;
            land.dirty = true;
            Ok(RemoteValue::Null)
        });
        self.on_land("Land_getOwner", "", |land, _| {
            let owner = if is_uuid(&land.owner) {
                land.owner.clone()
            } else {
                String::new()
            };
            Ok(owner.into())
        });
        self.on_land("Land_setOwner", (), |land, args| {
            let owner: String = arg(args, 1)?;
            if is_uuid(&owner) {
                land.owner = owner;
                land.dirty = true;
            }
            Ok(RemoteValue::Null)
        });
        self.on_land("Land_getRawOwner", "", |land, _| Ok(land.owner.clone().into()));
        self.on_land("Land_getMembers", Vec::<String>::new(), |land, _| {
            Ok(land.members.clone().into())
        });
        self.on_land("Land_addLandMember", (), |land, args| {
            let member: String = arg(args, 1)?;
            if is_uuid(&member) && !land.members.contains(&member) {
                land.members.push(member);
                land.dirty = true;
            }
            Ok(RemoteValue::Null)
        });
        self.on_land("Land_removeLandMember", (), |land, args| {
            let member: String = arg(args, 1)?;
            land.members.retain(|m| *m != member);
            land.dirty = true;
            Ok(RemoteValue::Null)
        });
        self.on_land("Land_getName", "", |land, _| Ok(land.name.clone().into()));
        self.on_land("Land_setName", (), |land, args| {
            land.name = arg(args, 1)?;
            land.dirty = true;
            Ok(RemoteValue::Null)
        });
        self.on_land("Land_getOriginalBuyPrice", 0, |land, _| Ok(land.price.into()));
        self.on_land("Land_setOriginalBuyPrice", (), |land, args| {
            land.price = arg(args, 1)?;
            land.dirty = true;
            Ok(RemoteValue::Null)
        });
        self.on_land("Land_is3D", false, |land, _| Ok(land.is_3d.into()));
        self.on_land("Land_isOwner", false, |land, args| {
            let uuid: String = arg(args, 1)?;
            Ok((is_uuid(&uuid) && land.owner == uuid).into())
        });
        self.on_land("Land_isMember", false, |land, args| {
            let uuid: String = arg(args, 1)?;
            Ok((is_uuid(&uuid) && land.members.contains(&uuid)).into())
        });
        self.on_land("Land_isConvertedLand", false, |_, _| Ok(false.into()));
        self.on_land("Land_isOwnerDataIsXUID", false, |land, _| {
            Ok((!is_uuid(&land.owner)).into())
        });
        self.on_land("Land_isCollision", false, |land, args| {
            let center: IntPos = arg(args, 1)?;
            let radius = arg::<i64>(args, 2)? as i32;
            let (min, max) = cube(center, radius);
            Ok(land.collides(min, max).into())
        });
        self.on_land("Land_isCollision2", false, |land, args| {
            let (min, max) = fixed(arg(args, 1)?, arg(args, 2)?);
            Ok(land.collides(min, max).into())
        });
        self.on_land("Land_isDirty", false, |land, _| Ok(land.dirty.into()));
        self.on_land("Land_getType", -1, |land, _| Ok(land.type_code().into()));
        self.on_land("Land_hasParentLand", false, |land, _| Ok(land.parent.is_some().into()));
        self.on_land("Land_hasSubLand", false, |land, _| Ok((!land.subs.is_empty()).into()));
        self.on_land("Land_isSubLand", false, |land, _| Ok((land.type_code() == 3).into()));
        self.on_land("Land_isParentLand", false, |land, _| Ok((land.type_code() == 1).into()));
        self.on_land("Land_isMixLand", false, |land, _| Ok((land.type_code() == 2).into()));
        self.on_land("Land_isOrdinaryLand", false, |land, _| Ok((land.type_code() == 0).into()));
        self.expose("Land_canCreateSubLand", |world, args| {
            let id: i64 = arg(args, 0)?;
            Ok((world.lands.contains_key(&id) && world.nested_level(id) < 2).into())
        });
        self.on_land("Land_getParentLandID", -1, |land, _| {
            Ok(land.parent.unwrap_or(-1).into())
        });
        self.on_land("Land_getSubLandIDs", Vec::<i64>::new(), |land, _| {
            Ok(land.subs.clone().into())
        });
        self.expose("Land_getNestedLevel", |world, args| {
            let id: i64 = arg(args, 0)?;
            Ok(world.nested_level(id).into())
        });
        self.on_land("Land_getPermType", 3, |land, args| {
            let uuid: String = arg(args, 1)?;
            Ok(RemoteValue::Int(perm_code(land, &uuid)))
        });
    }

    fn install_registry(&self) {
        self.expose("LandRegistry_isOperator", |world, args| {
            let uuid: String = arg(args, 0)?;
            Ok(world.operators.contains(&uuid).into())
        });
        self.expose("LandRegistry_addOperator", |world, args| {
            let uuid: String = arg(args, 0)?;
            if !is_uuid(&uuid) || world.operators.contains(&uuid) {
                return Ok(false.into());
            }
            world.operators.push(uuid);
            Ok(true.into())
        });
        self.expose("LandRegistry_removeOperator", |world, args| {
            let uuid: String = arg(args, 0)?;
            let before = world.operators.len();
            world.operators.retain(|op| *op != uuid);
            Ok((world.operators.len() != before).into())
        });
        self.expose("LandRegistry_getOperators", |world, _| {
            Ok(world.operators.clone().into())
        });
        self.expose("LandRegistry_getOrCreatePlayerSettings", |_, args| {
            let uuid: String = arg(args, 0)?;
            if !is_uuid(&uuid) {
                return Ok("".into());
            }
            let settings = PlayerSettings {
                show_enter_land_title: true,
                show_bottom_continued_tip: false,
            };
            Ok(serde_json::to_string(&settings).unwrap().into())
        });
        self.expose("LandRegistry_getLand", |world, args| {
            let id: i64 = arg(args, 0)?;
            Ok(RemoteValue::Int(if world.lands.contains_key(&id) { id } else { -1 }))
        });
        self.expose("LandRegistry_hasLand", |world, args| {
            let id: i64 = arg(args, 0)?;
            Ok(world.lands.contains_key(&id).into())
        });
        self.expose("LandRegistry_getLands", |world, _| Ok(world.ids_where(|_| true)));
        self.expose("LandRegistry_getLands1", |world, args| {
            let dimid = arg::<i64>(args, 0)? as i32;
            Ok(world.ids_where(|land| land.min.dimid == dimid))
        });
        self.expose("LandRegistry_getLands2", |world, args| {
            let uuid: String = arg(args, 0)?;
            let shared: bool = arg(args, 1)?;
            Ok(world.ids_where(|land| land.owner == uuid || (shared && land.members.contains(&uuid))))
        });
        self.expose("LandRegistry_getLands3", |world, args| {
            let uuid: String = arg(args, 0)?;
            let dimid = arg::<i64>(args, 1)? as i32;
            Ok(world.ids_where(|land| land.owner == uuid && land.min.dimid == dimid))
        });
        self.expose("LandRegistry_getLands4", |world, args| {
            let ids: Vec<i64> = arg(args, 0)?;
            let found: Vec<i64> = ids
                .into_iter()
                .filter(|id| world.lands.contains_key(id))
                .collect();
            Ok(found.into())
        });
        self.expose("LandRegistry_getPermType", |world, args| {
            let uuid: String = arg(args, 0)?;
            let id: i64 = arg(args, 1)?;
            let include_operator: bool = arg(args, 2)?;
            if include_operator && world.operators.contains(&uuid) {
                return Ok(RemoteValue::Int(0));
            }
            Ok(RemoteValue::Int(
                world.lands.get(&id).map_or(3, |land| perm_code(land, &uuid)),
            ))
        });
        self.expose("LandRegistry_getLandAt", |world, args| {
            let pos: IntPos = arg(args, 0)?;
            let found = world
                .lands
                .iter()
                .filter(|(_, land)| {
                    land.min.dimid == pos.dimid && contains_pos(land.min, land.max, pos, land.is_3d)
                })
                .max_by_key(|(id, _)| world.nested_level(**id))
                .map_or(-1, |(id, _)| *id);
            Ok(RemoteValue::Int(found))
        });
        self.expose("LandRegistry_getLandAt1", |world, args| {
            let center: IntPos = arg(args, 0)?;
            let radius = arg::<i64>(args, 1)? as i32;
            let (min, max) = cube(center, radius);
            Ok(world.ids_where(|land| land.collides(min, max)))
        });
        self.expose("LandRegistry_getLandAt2", |world, args| {
            let (min, max) = fixed(arg(args, 0)?, arg(args, 1)?);
            Ok(world.ids_where(|land| land.collides(min, max)))
        });
        self.expose("LandRegistry_refreshLandRange", |world, args| {
            let id: i64 = arg(args, 0)?;
            if world.lands.contains_key(&id) {
                world.refreshed.push(id);
            }
            Ok(RemoteValue::Null)
        });
        self.expose("PLand_getVersionMeta", |_, _| {
            Ok(r#"{"Commit":"0f3c2a1","Branch":"main","Tag":"v0.18.0"}"#.into())
        });
        self.expose("LandRegistry_removeOrdinaryLand", |world, args| {
            let id: i64 = arg(args, 0)?;
            let text = match world.lands.get(&id) {
                None => r#"{"ok":false,"error":"land not found"}"#,
                Some(land) if land.type_code() != 0 => {
                    r#"{"ok":false,"error":"not an ordinary land"}"#
                }
                Some(_) => {
                    world.lands.remove(&id);
                    r#"{"ok":true}"#
                }
            };
            Ok(text.into())
        });
        self.expose("LandRegistry_addOrdinaryLand", |world, args| {
            let corners: Vec<IntPos> = arg(args, 0)?;
            let is_3d: bool = arg(args, 1)?;
            let owner: String = arg(args, 2)?;
            if corners.len() != 2 || corners[0].dimid != corners[1].dimid {
                return Err(HostError::new("LandRegistry_addOrdinaryLand: Invalid AABB"));
            }
            if !is_uuid(&owner) {
                return Err(HostError::new("LandRegistry_addOrdinaryLand: Invalid owner"));
            }
            let land = FakeLand::new(corners[0], corners[1], is_3d, &owner);
            if let Some((id, _)) = world
                .lands
                .iter()
                .find(|(_, other)| other.collides(land.min, land.max))
            {
                return Ok(format!(r#"{{"ok":false,"error":"range conflicts with land {}"}}"#, id).into());
            }
            let id = world.insert(land);
            Ok(format!(r#"{{"ok":true,"value":{}}}"#, id).into())
        });
    }

    fn install_events(&self) {
        self.expose("ScriptEventManager_genListenerID", |world, _| {
            let key = format!("{}_Event_{}", NAMESPACE, world.listener_count);
            world.listener_count += 1;
            Ok(key.into())
        });

        let host = Arc::downgrade(&self.host);
        self.expose("Event_RegisterListener", move |world, args| {
            let event: String = arg(args, 0)?;
            let key: String = arg(args, 1)?;
            let exported = host
                .upgrade()
                .map_or(false, |host| host.has_function(&event, &key));
            if world.reject_listeners || EventKind::from_name(&event).is_none() || !exported {
                return Ok(false.into());
            }
            world.listeners.push((event, key));
            Ok(true.into())
        });
    }
}

fn arg<T: FromRemote>(args: &[RemoteValue], index: usize) -> Result<T, HostError> {
    let value = args
        .get(index)
        .cloned()
        .ok_or_else(|| HostError::new(format!("missing argument {}", index)))?;
    T::from_remote(value).map_err(|e| HostError::new(e.to_string()))
}

fn is_uuid(text: &str) -> bool {
    text.len() == 36 && text.matches('-').count() == 4
}

fn perm_code(land: &FakeLand, uuid: &str) -> i64 {
    if land.owner == uuid {
        1
    } else if land.members.iter().any(|m| m == uuid) {
        2
    } else {
        3
    }
}

fn fixed(a: IntPos, b: IntPos) -> (IntPos, IntPos) {
    (
        IntPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z), a.dimid),
        IntPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z), a.dimid),
    )
}

fn span(lo: i32, hi: i32) -> i64 {
    (hi - lo) as i64 + 1
}

fn cube(center: IntPos, radius: i32) -> (IntPos, IntPos) {
    (
        IntPos::new(center.x - radius, center.y - radius, center.z - radius, center.dimid),
        IntPos::new(center.x + radius, center.y + radius, center.z + radius, center.dimid),
    )
}

fn contains_pos(min: IntPos, max: IntPos, pos: IntPos, include_y: bool) -> bool {
    let within = |v: i32, lo: i32, hi: i32| lo <= v && v <= hi;
    within(pos.x, min.x, max.x)
        && within(pos.z, min.z, max.z)
        && (!include_y || within(pos.y, min.y, max.y))
}

fn overlaps(a_min: IntPos, a_max: IntPos, b_min: IntPos, b_max: IntPos, include_y: bool) -> bool {
    let axis = |a0: i32, a1: i32, b0: i32, b1: i32| a0 <= b1 && b0 <= a1;
    axis(a_min.x, a_max.x, b_min.x, b_max.x)
        && axis(a_min.z, a_max.z, b_min.z, b_max.z)
        && (!include_y || axis(a_min.y, a_max.y, b_min.y, b_max.y))
}

fn box_corners(min: IntPos, max: IntPos) -> Vec<IntPos> {
    let mut corners = Vec::with_capacity(8);
    for x in [min.x, max.x] {
        for y in [min.y, max.y] {
            for z in [min.z, max.z] {
                corners.push(IntPos::new(x, y, z, min.dimid));
            }
        }
    }
    corners
}
