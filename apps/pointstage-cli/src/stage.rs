//! The driver: mounts one world at a time and wires it to the camera and a projector.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use pointstage_common::{CameraPose, SubscriptionId};
use pointstage_input::{Action, action_for_key};
use pointstage_kernel::{KernelError, World, WorldId, WorldSettings};
use pointstage_render::{Camera, Projector, ShapeSet};

struct Mounted {
    world: World,
    projector: Rc<RefCell<Projector>>,
    camera_binding: SubscriptionId,
    projection: SubscriptionId,
}

/// Owns the camera and the mounted world.
///
/// World frames flow through two subscriptions registered in this order:
/// the camera binding applies the frame's nudge, then the projection
/// projects the frame through the updated pose.
pub struct Stage {
    settings: WorldSettings,
    camera: Rc<RefCell<Camera>>,
    mounted: Option<Mounted>,
    perspectives: BTreeMap<WorldId, CameraPose>,
    latest: Rc<RefCell<Option<ShapeSet>>>,
    skipped: Rc<RefCell<u64>>,
}

impl Stage {
    pub fn new(settings: WorldSettings) -> Self {
        Self {
            settings,
            camera: Rc::new(RefCell::new(Camera::default())),
            mounted: None,
            perspectives: BTreeMap::new(),
            latest: Rc::new(RefCell::new(None)),
            skipped: Rc::new(RefCell::new(0)),
        }
    }

    pub fn camera(&self) -> Rc<RefCell<Camera>> {
        Rc::clone(&self.camera)
    }

    pub fn world(&self) -> Option<&World> {
        self.mounted.as_ref().map(|m| &m.world)
    }

    /// Last shape set published by the mounted world's projector.
    pub fn shapes(&self) -> Option<ShapeSet> {
        self.latest.borrow().clone()
    }

    /// Frames dropped because the camera transform could not be inverted.
    pub fn skipped_frames(&self) -> u64 {
        *self.skipped.borrow()
    }

    /// Build `id`, restore its perspective and start projecting it.
    ///
    /// The running world stays mounted if `id` fails to build.
    pub fn mount(&mut self, id: WorldId) -> Result<(), KernelError> {
        let mut world = World::build(id, &self.settings)?;
        self.unmount();
        if let Some(pose) = self.perspectives.get(&id) {
            world.remember_perspective(*pose);
        }
        {
            let mut camera = self.camera.borrow_mut();
            camera.set_home(world.home_perspective());
            camera.restore(world.last_perspective());
        }

        let camera = Rc::clone(&self.camera);
        let camera_binding = world.subscribe(move |frame| {
            if let Some(nudge) = &frame.camera_nudge {
                camera.borrow_mut().apply_nudge(nudge);
            }
        });

        let projector = Rc::new(RefCell::new(Projector::new()));
        let latest = Rc::clone(&self.latest);
        projector
            .borrow_mut()
            .subscribe(move |shapes| *latest.borrow_mut() = Some(shapes.clone()));

        let camera = Rc::clone(&self.camera);
        let sink = Rc::clone(&projector);
        let skipped = Rc::clone(&self.skipped);
        let projection = world.subscribe(move |frame| {
            let pose = camera.borrow().pose();
            if let Err(error) = sink.borrow_mut().project(&frame.state, &pose) {
                *skipped.borrow_mut() += 1;
                tracing::warn!(tick = frame.tick, %error, "frame skipped");
            }
        });

        tracing::info!(world = id.slug(), name = world.name(), "world mounted");
        self.mounted = Some(Mounted {
            world,
            projector,
            camera_binding,
            projection,
        });
        Ok(())
    }

    /// Release the mounted world, remembering where the camera was.
    pub fn unmount(&mut self) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };
        let pose = self.camera.borrow().pose();
        mounted.world.remember_perspective(pose);
        self.perspectives
            .insert(mounted.world.id(), mounted.world.last_perspective());
        mounted.world.unsubscribe(mounted.camera_binding);
        mounted.world.unsubscribe(mounted.projection);
        *self.latest.borrow_mut() = None;
        tracing::debug!(world = mounted.world.id().slug(), at = mounted.world.time(), "world unmounted");
    }

    pub fn switch(&mut self, id: WorldId) -> Result<(), KernelError> {
        self.mount(id)
    }

    /// Advance the mounted world by one tick. Returns false when nothing is mounted.
    pub fn tick(&mut self) -> bool {
        match &mut self.mounted {
            Some(mounted) => {
                mounted.world.tick();
                true
            }
            None => false,
        }
    }

    /// Handle a named key. Camera keys first, then digit keys switch worlds.
    pub fn on_key(&mut self, key: &str) -> Result<bool, KernelError> {
        match action_for_key(key) {
            Some(Action::SwitchWorld(n)) => match WorldId::from_index(n) {
                Some(id) => {
                    self.switch(id)?;
                    Ok(true)
                }
                None => Ok(false),
            },
            Some(action) => {
                let handled = action.apply(&mut self.camera.borrow_mut());
                if handled {
                    self.reproject();
                }
                Ok(handled)
            }
            None => {
                tracing::debug!(key, "unhandled key");
                Ok(false)
            }
        }
    }

    /// Project the mounted world's current state through the current pose.
    fn reproject(&self) {
        let Some(mounted) = &self.mounted else {
            return;
        };
        let pose = self.camera.borrow().pose();
        if let Err(error) = mounted
            .projector
            .borrow_mut()
            .project(mounted.world.state(), &pose)
        {
            *self.skipped.borrow_mut() += 1;
            tracing::warn!(%error, "reprojection skipped");
        }
    }
}
