use super::body::BodyId;

/// The body the camera should follow, if any.
///
/// Written only by click handling and read by the camera controller once per frame.
/// There is deliberately no way to go back to "nothing selected".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    selected: Option<BodyId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites any previous selection. Returns whether it changed.
    pub fn select(&mut self, id: BodyId) -> bool {
        if self.selected.as_ref() == Some(&id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn get(&self) -> Option<&BodyId> {
        self.selected.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_overwrites() {
        let mut selection = Selection::new();
        assert_eq!(selection.get(), None);

        assert!(selection.select(BodyId::new("earth")));
        assert_eq!(selection.get(), Some(&BodyId::new("earth")));

        assert!(!selection.select(BodyId::new("earth")));

        assert!(selection.select(BodyId::new("sun")));
        assert_eq!(selection.get(), Some(&BodyId::new("sun")));
    }
}
