use super::anim::{
    AnimationRule, MoveRule, PulseScaleRule, PulseState, RotateRule, RuleError, Transform,
};
use super::constants::{INITIAL_PARK, PULSE_START_RATIO};
use super::layout::{Viewport, PLANES};
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

pub type ObjectId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Plane { image: &'static str },
    TextBlock,
}

/// Whether an object's rules run yet. Objects that depend on an async
/// resource start `Pending` and are skipped by the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    Pending,
    Ready,
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub kind: ObjectKind,
    /// Quad size in world units.
    pub size: Vec2,
    pub transform: Transform,
    pub pulse: PulseState,
    pub readiness: Readiness,
    rules: SmallVec<[AnimationRule; 3]>,
}

impl SceneObject {
    pub fn rules(&self) -> &[AnimationRule] {
        &self.rules
    }

    /// Short name for logs and GPU labels.
    pub fn label(&self) -> &'static str {
        match self.kind {
            ObjectKind::Plane { image } => image,
            ObjectKind::TextBlock => "text_block",
        }
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    fn animate<R: Rng>(&mut self, offset: f32, rng: &mut R) -> usize {
        for rule in &self.rules {
            rule.evaluate(offset, &mut self.transform, &mut self.pulse, rng);
        }
        self.rules.len()
    }
}

/// Registry of everything drawn on the page, in registration order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        kind: ObjectKind,
        size: Vec2,
        transform: Transform,
        rules: impl IntoIterator<Item = AnimationRule>,
        readiness: Readiness,
    ) -> ObjectId {
        self.objects.push(SceneObject {
            kind,
            size,
            transform,
            pulse: PulseState::Idle,
            readiness,
            rules: rules.into_iter().collect(),
        });
        self.objects.len() - 1
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Mark a pending object ready once its resource arrived, fixing its
    /// final size and resting center. Returns false for unknown or
    /// already-ready ids.
    pub fn activate(&mut self, id: ObjectId, size: Vec2, center: Vec2) -> bool {
        match self.objects.get_mut(id) {
            Some(obj) if obj.readiness == Readiness::Pending => {
                obj.size = size;
                obj.transform.position.x = center.x;
                obj.transform.position.y = center.y;
                obj.readiness = Readiness::Ready;
                true
            }
            _ => false,
        }
    }

    /// Evaluate every ready object's rules against `offset`, in registration
    /// order. Returns the number of rule evaluations.
    pub fn animate<R: Rng>(&mut self, offset: f32, rng: &mut R) -> usize {
        let mut evaluated = 0;
        for obj in self.objects.iter_mut().filter(|o| o.is_ready()) {
            evaluated += obj.animate(offset, rng);
        }
        evaluated
    }
}

/// Per-frame driver: animate, then draw exactly once.
pub struct FrameLoop<R> {
    scene: Scene,
    rng: R,
    frames: u64,
}

impl<R: Rng> FrameLoop<R> {
    pub fn new(scene: Scene, rng: R) -> Self {
        Self {
            scene,
            rng,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick(&mut self, offset: f32, draw: impl FnOnce(&Scene)) -> usize {
        let evaluated = self.scene.animate(offset, &mut self.rng);
        draw(&self.scene);
        self.frames += 1;
        evaluated
    }
}

/// Ids of the objects created by [`build_scene`].
#[derive(Clone, Debug)]
pub struct SceneHandles {
    pub planes: Vec<ObjectId>,
    pub text: ObjectId,
}

/// Register the six image planes (ready immediately) followed by the text
/// block (pending until its font loads).
pub fn build_scene(vp: &Viewport) -> Result<(Scene, SceneHandles), RuleError> {
    let mut scene = Scene::new();
    let side = vp.plane_size();
    let pulse_threshold = vp.h(PULSE_START_RATIO);

    let mut planes = Vec::with_capacity(PLANES.len());
    for plane in &PLANES {
        let mv = MoveRule::new(
            vp.h(plane.move_window.0),
            vp.h(plane.move_window.1),
            plane.entry_point(vp),
            plane.slot(vp),
        )?;
        let rot = RotateRule::new(vp.h(plane.rotate_window.0), vp.h(plane.rotate_window.1))?;
        let id = scene.add(
            ObjectKind::Plane { image: plane.image },
            Vec2::splat(side),
            Transform::at(INITIAL_PARK, INITIAL_PARK),
            [
                mv.into(),
                rot.into(),
                PulseScaleRule::new(pulse_threshold).into(),
            ],
            Readiness::Ready,
        );
        planes.push(id);
    }

    let text = scene.add(
        ObjectKind::TextBlock,
        Vec2::ZERO,
        Transform::default(),
        [AnimationRule::Follow { base_y: 0.0 }],
        Readiness::Pending,
    );

    Ok((scene, SceneHandles { planes, text }))
}
