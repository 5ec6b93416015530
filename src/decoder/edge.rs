#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    Rising,
    Falling,
}

/// Tracks a recurring boolean signal and reports only its transitions.
#[derive(Debug, Default)]
pub(crate) struct EdgeDetector {
    active: bool,
}

impl EdgeDetector {
    pub fn observe(&mut self, value: bool) -> Option<Edge> {
        match (self.active, value) {
            (false, true) => {
                self.active = true;
                Some(Edge::Rising)
            }
            (true, false) => {
                self.active = false;
                Some(Edge::Falling)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_transitions() {
        let mut detector = EdgeDetector::default();

        let edges: Vec<_> = [true, true, false, false, true]
            .into_iter()
            .map(|value| detector.observe(value))
            .collect();

        assert_eq!(
            edges,
            vec![
                Some(Edge::Rising),
                None,
                Some(Edge::Falling),
                None,
                Some(Edge::Rising)
            ]
        );
        assert_eq!(detector.observe(true), None);
    }

    #[test]
    fn initial_false_is_not_an_edge() {
        let mut detector = EdgeDetector::default();
        assert_eq!(detector.observe(false), None);
        assert_eq!(detector.observe(true), Some(Edge::Rising));
    }
}
