use egui::Vec2;

use super::{Canvas, CanvasObject, ObjectId};

/// In-memory canvas: an ordered object list (back to front), an active
/// selection and a size.
#[derive(Debug, Clone)]
pub struct SceneCanvas {
    size: Vec2,
    objects: Vec<(ObjectId, CanvasObject)>,
    active: Option<ObjectId>,
    render_count: u64,
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new(Vec2::new(800.0, 600.0))
    }
}

impl SceneCanvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            objects: Vec::new(),
            active: None,
            render_count: 0,
        }
    }

    /// Objects in z-order, back first
    pub fn objects(&self) -> impl Iterator<Item = &CanvasObject> {
        self.objects.iter().map(|(_, object)| object)
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn find(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects
            .iter()
            .find(|(object_id, _)| *object_id == id)
            .map(|(_, object)| object)
    }

    pub fn active_id(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn active_object(&self) -> Option<&CanvasObject> {
        self.active.and_then(|id| self.find(id))
    }

    /// Objects that belong in an export or print, i.e. everything but guides
    pub fn exportable_objects(&self) -> impl Iterator<Item = &CanvasObject> {
        self.objects().filter(|object| !object.is_guide())
    }

    pub fn guides(&self) -> impl Iterator<Item = &CanvasObject> {
        self.objects().filter(|object| object.is_guide())
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.active = None;
    }
}

impl Canvas for SceneCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn set_dimensions(&mut self, size: Vec2) {
        log::debug!("Canvas resized to {}x{}", size.x, size.y);
        self.size = size;
    }

    fn add_object(&mut self, object: CanvasObject) -> ObjectId {
        let id = ObjectId::new();
        log::debug!("Added {} object {:?}", object.kind(), id);
        self.objects.push((id, object));
        id
    }

    fn set_active_object(&mut self, id: ObjectId) {
        if self.find(id).is_some() {
            self.active = Some(id);
        }
    }

    fn send_to_back(&mut self, id: ObjectId) {
        if let Some(index) = self.objects.iter().position(|(object_id, _)| *object_id == id) {
            let entry = self.objects.remove(index);
            self.objects.insert(0, entry);
        }
    }

    fn render(&mut self) {
        self.render_count += 1;
    }
}
