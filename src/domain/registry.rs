use super::item::{Spiral, SpiralId, Task, TaskId};

/// Ordered collection of tasks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn push(&mut self, task: Task) -> TaskId {
        let id = task.id;
        self.tasks.push(task);
        id
    }

    /// Remove by id, returning the removed index and task
    pub fn remove(&mut self, id: TaskId) -> Option<(usize, Task)> {
        let idx = self.position(id)?;
        Some((idx, self.tasks.remove(idx)))
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn get(&self, idx: usize) -> Option<&Task> {
        self.tasks.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Task> {
        self.tasks.get_mut(idx)
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// First task not yet completed
    pub fn first_incomplete(&self) -> Option<usize> {
        self.tasks.iter().position(|t| !t.completed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

/// Ordered collection of spirals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpiralRegistry {
    spirals: Vec<Spiral>,
}

impl SpiralRegistry {
    pub fn new(spirals: Vec<Spiral>) -> Self {
        Self { spirals }
    }

    pub fn push(&mut self, spiral: Spiral) -> SpiralId {
        let id = spiral.id;
        self.spirals.push(spiral);
        id
    }

    pub fn remove(&mut self, id: SpiralId) -> Option<Spiral> {
        let idx = self.spirals.iter().position(|s| s.id == id)?;
        Some(self.spirals.remove(idx))
    }

    pub fn find(&self, id: SpiralId) -> Option<&Spiral> {
        self.spirals.iter().find(|s| s.id == id)
    }

    pub fn get(&self, idx: usize) -> Option<&Spiral> {
        self.spirals.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spiral> {
        self.spirals.iter()
    }

    pub fn as_slice(&self) -> &[Spiral] {
        &self.spirals
    }

    pub fn len(&self) -> usize {
        self.spirals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spirals.is_empty()
    }
}
