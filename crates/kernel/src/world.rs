use pointstage_common::{
    CameraNudge, CameraPose, ONE_DEGREE, Signal, SpaceCoord, SpacePath, SubscriptionId,
};
use std::f64::consts::PI;

use crate::KernelError;
use crate::config::WorldSettings;
use crate::kinds::{
    BellCurve, Lattice, ParticleBox, PendulumGrid, PendulumReplay, PulsingCube, WorldKind,
    random_walk,
};
use crate::registry::WorldId;

/// Full visible geometry of a world at one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldState {
    pub dots: Vec<SpaceCoord>,
    pub paths: Vec<SpacePath>,
}

/// What a world publishes after `init` and after every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldFrame {
    pub tick: u64,
    pub state: WorldState,
    /// Relative camera motion suggested for this tick, if any.
    pub camera_nudge: Option<CameraNudge>,
}

/// A running simulation.
///
/// Owns its geometry and time counter. Consumers subscribe to the frame
/// stream; a new subscriber immediately receives the latest frame.
pub struct World {
    id: WorldId,
    kind: WorldKind,
    /// Construction-time state, kept for `restart`.
    initial: WorldKind,
    t: u64,
    state: WorldState,
    camera_nudge: Option<CameraNudge>,
    home: CameraPose,
    last_perspective: CameraPose,
    frames: Signal<WorldFrame>,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("id", &self.id)
            .field("t", &self.t)
            .field("dots", &self.state.dots.len())
            .field("paths", &self.state.paths.len())
            .finish()
    }
}

impl World {
    /// Build the world registered under `id`.
    ///
    /// Configuration is validated here; a bad record is a construction error.
    pub fn build(id: WorldId, settings: &WorldSettings) -> Result<Self, KernelError> {
        let kind = match id {
            WorldId::Axes => WorldKind::Static(Lattice::axes()),
            WorldId::Grid => WorldKind::Static(Lattice::grid()),
            WorldId::Table => WorldKind::Static(Lattice::table(&settings.table)),
            WorldId::Cube => WorldKind::Cube(PulsingCube::default()),
            WorldId::BellCurve => WorldKind::BellCurve(BellCurve::default()),
            WorldId::BouncingParticles => {
                WorldKind::Particles(ParticleBox::new(&settings.particles))
            }
            WorldId::PendulumLive => {
                settings.pendulum.validate()?;
                WorldKind::PendulumLive(PendulumGrid::new(settings.pendulum))
            }
            WorldId::PendulumBatch => WorldKind::PendulumBatch(PendulumReplay::new()),
            WorldId::RandomWalk => {
                settings.random_walk.validate()?;
                WorldKind::Static(Lattice::new(random_walk::generate(&settings.random_walk)))
            }
        };
        let home = settings
            .perspectives
            .get(&id)
            .copied()
            .unwrap_or_else(|| default_perspective(id));
        Ok(Self::from_kind(id, kind, home))
    }

    /// Wrap an already-built variant and publish its state at t = 0.
    pub fn from_kind(id: WorldId, kind: WorldKind, home: CameraPose) -> Self {
        let (dots, paths) = kind.geometry();
        let mut world = Self {
            id,
            initial: kind.clone(),
            kind,
            t: 0,
            state: WorldState { dots, paths },
            camera_nudge: None,
            home,
            last_perspective: home,
            frames: Signal::new(),
        };
        tracing::debug!(
            world = id.slug(),
            dots = world.state.dots.len(),
            paths = world.state.paths.len(),
            "world built"
        );
        world.init();
        world
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    /// Display label.
    pub fn name(&self) -> &'static str {
        self.id.label()
    }

    /// Current tick.
    pub fn time(&self) -> u64 {
        self.t
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn kind(&self) -> &WorldKind {
        &self.kind
    }

    /// Recompute geometry for tick `t`.
    pub fn transition_to_state_at(&mut self, t: u64) {
        self.kind.advance(t);
        let (dots, paths) = self.kind.geometry();
        self.state = WorldState { dots, paths };
        self.camera_nudge = self.kind.camera_nudge(t);
    }

    /// Advance time by one, recompute, publish.
    pub fn tick(&mut self) {
        let _span = tracing::trace_span!("world_tick", world = self.id.slug()).entered();
        self.t += 1;
        self.transition_to_state_at(self.t);
        self.emit();
    }

    /// Publish the current state without advancing time.
    pub fn init(&mut self) {
        self.camera_nudge = None;
        self.emit();
    }

    /// Back to construction-time state at t = 0, then publish.
    pub fn restart(&mut self) {
        tracing::debug!(world = self.id.slug(), at = self.t, "world restarted");
        self.kind = self.initial.clone();
        self.t = 0;
        let (dots, paths) = self.kind.geometry();
        self.state = WorldState { dots, paths };
        self.init();
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&WorldFrame) + 'static) -> SubscriptionId {
        self.frames.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.frames.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.frames.subscriber_count()
    }

    /// Pose the camera resets to while this world is mounted.
    pub fn home_perspective(&self) -> CameraPose {
        self.home
    }

    /// Pose the camera had when this world was last unmounted.
    pub fn last_perspective(&self) -> CameraPose {
        self.last_perspective
    }

    pub fn remember_perspective(&mut self, pose: CameraPose) {
        self.last_perspective = pose;
    }

    fn emit(&mut self) {
        self.frames.emit(WorldFrame {
            tick: self.t,
            state: self.state.clone(),
            camera_nudge: self.camera_nudge,
        });
    }
}

/// Built-in home pose of each world.
pub fn default_perspective(id: WorldId) -> CameraPose {
    match id {
        WorldId::Axes => CameraPose::with_angles(PI / 5.0, PI / 4.0, 0.0),
        WorldId::BouncingParticles => CameraPose::with_angles(PI / 5.0, 0.0, 0.0),
        WorldId::BellCurve => CameraPose {
            position: glam::DVec3::new(0.0, 0.5, -3.6),
            angle_x: 20.0 * ONE_DEGREE,
            ..CameraPose::default()
        },
        _ => CameraPose::default(),
    }
}
