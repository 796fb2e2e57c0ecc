//! Source location carried down the forwarding chain

use std::panic::Location;

/// The call site of a logging statement and the number of frames it has been
/// forwarded through.
///
/// The location is captured once, at the public entry point, through
/// `#[track_caller]`. Every relay hop increments the depth, so a collector can
/// tell how far from the original call it is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    location: &'static Location<'static>,
    depth: usize,
}

impl Caller {
    /// Captures the location of the (tracked) caller with a depth of zero.
    #[track_caller]
    #[inline]
    pub fn here() -> Self {
        Self::at_depth(0)
    }

    #[track_caller]
    #[inline]
    pub fn at_depth(depth: usize) -> Self {
        Self {
            location: Location::caller(),
            depth,
        }
    }

    /// A caller at an explicit location, e.g. one captured earlier.
    pub fn new(location: &'static Location<'static>, depth: usize) -> Self {
        Self { location, depth }
    }

    /// The same call site, one forwarding frame further away.
    #[must_use]
    #[inline]
    pub fn forwarded(self) -> Self {
        Self {
            location: self.location,
            depth: self.depth + 1,
        }
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    /// Final component of the source path.
    pub fn short_file(&self) -> &'static str {
        let file = self.location.file();
        file.rsplit(['/', '\\']).next().unwrap_or(file)
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_here_points_at_this_file() {
        let line = line!() + 1;
        let caller = Caller::here();
        assert_eq!(caller.line(), line);
        assert_eq!(caller.short_file(), "caller.rs");
        assert!(caller.file().ends_with("caller.rs"));
        assert_eq!(caller.depth(), 0);
    }

    #[track_caller]
    fn tracked() -> Caller {
        Caller::at_depth(2)
    }

    #[test]
    fn test_tracked_caller_propagates() {
        let line = line!() + 1;
        let caller = tracked();
        assert_eq!(caller.line(), line);
        assert_eq!(caller.depth(), 2);
    }

    #[test]
    fn test_forwarded_keeps_location() {
        let caller = Caller::here();
        let forwarded = caller.forwarded().forwarded();
        assert_eq!(forwarded.depth(), 2);
        assert_eq!(forwarded.location(), caller.location());
    }
}
