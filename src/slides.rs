/// Current position in a linear deck of `total` slides, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideModel {
    current: usize,
    total: usize,
}

impl SlideModel {
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Out-of-range targets are ignored and `false` is returned.
    pub fn go_to(&mut self, slide: usize) -> bool {
        if (1..=self.total).contains(&slide) {
            self.current = slide;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// `current / total`, in `(0, 1]`.
    pub fn completion_ratio(&self) -> f64 {
        self.current as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 18;

    #[test]
    fn test_starts_on_first_slide() {
        let model = SlideModel::new(N);
        assert_eq!(model.current(), 1);
        assert_eq!(model.total(), N);
        assert!(!model.has_previous());
        assert!(model.has_next());
    }

    #[test]
    fn test_go_to_every_valid_slide() {
        let mut model = SlideModel::new(N);
        for n in 1..=N {
            assert!(model.go_to(n));
            assert_eq!(model.current(), n);
        }
    }

    #[test]
    fn test_go_to_out_of_range_is_ignored() {
        let mut model = SlideModel::new(N);
        model.go_to(5);
        assert!(!model.go_to(0));
        assert_eq!(model.current(), 5);
        assert!(!model.go_to(N + 1));
        assert_eq!(model.current(), 5);
        assert!(!model.go_to(usize::MAX));
        assert_eq!(model.current(), 5);
    }

    #[test]
    fn test_next_clamps_at_last_slide() {
        let mut model = SlideModel::new(N);
        model.go_to(N);
        assert!(!model.next());
        assert_eq!(model.current(), N);
        assert!(!model.has_next());
    }

    #[test]
    fn test_previous_clamps_at_first_slide() {
        let mut model = SlideModel::new(N);
        assert!(!model.previous());
        assert_eq!(model.current(), 1);
    }

    #[test]
    fn test_step_forward_and_back() {
        let mut model = SlideModel::new(N);
        assert!(model.next());
        assert!(model.next());
        assert_eq!(model.current(), 3);
        assert!(model.previous());
        assert_eq!(model.current(), 2);
    }

    #[test]
    fn test_completion_ratio() {
        let mut model = SlideModel::new(4);
        assert_eq!(model.completion_ratio(), 0.25);
        model.go_to(4);
        assert_eq!(model.completion_ratio(), 1.0);
    }

    #[test]
    fn test_empty_deck_still_has_one_slide() {
        let mut model = SlideModel::new(0);
        assert_eq!(model.total(), 1);
        assert!(!model.next());
        assert_eq!(model.completion_ratio(), 1.0);
    }
}
