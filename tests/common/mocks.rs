use cachesim_core::cache::policies::{VictimContext, VictimFinder};
use cachesim_core::cache::{Block, Set};
use mockall::mock;

mock! {
    pub Finder {
        /// Hit-outcome hook.
        pub fn on_hit(&mut self, addr: u64);
        /// Eviction-outcome hook.
        pub fn on_evict(&mut self, addr: u64);
        /// Recency hook (the touched way).
        pub fn on_touch(&mut self, way_id: usize);
    }
}

/// Forwards the trait hooks into the mocked inherent methods.
///
/// Victim selection itself is not mocked; the directory tests exercise it
/// through the real policies and only verify hook forwarding here.
impl VictimFinder for MockFinder {
    fn find_victim<'a>(&mut self, set: &'a Set, _ctx: &VictimContext) -> &'a Block {
        &set.blocks[0]
    }

    fn on_hit(&mut self, addr: u64) {
        MockFinder::on_hit(self, addr);
    }

    fn on_evict(&mut self, addr: u64) {
        MockFinder::on_evict(self, addr);
    }

    fn on_touch(&mut self, set: &mut Set, way_id: usize) {
        let _ = set;
        MockFinder::on_touch(self, way_id);
    }
}
