//! Test suites, groups and cases.
//!
//! A group maps names to procedures. Two names are reserved for fixtures:
//! [`SETUP`] runs before the group's cases and [`TEARDOWN`] after them. Every
//! other entry is a case, run in the order it was added. Adding an entry
//! under an existing name replaces the procedure but keeps its position.

use std::fmt;

use crate::error::CaseResult;

/// Reserved entry name of the setup fixture.
pub const SETUP: &str = "setup";
/// Reserved entry name of the teardown fixture.
pub const TEARDOWN: &str = "teardown";

/// A test case or fixture procedure.
///
/// Cases sharing state with their fixtures typically capture an
/// `Rc<RefCell<_>>`; procedures never need to be `Send`.
pub type TestFn = Box<dyn FnMut() -> CaseResult>;

/// A named collection of cases with optional fixtures.
pub struct TestGroup {
    name: String,
    entries: Vec<(String, TestFn)>,
}

impl TestGroup {
    pub fn new(name: impl Into<String>) -> Self {
        TestGroup {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add the entry `name`.
    ///
    /// `"setup"` and `"teardown"` become fixtures; any other name is a case
    /// described by that name.
    #[must_use]
    pub fn case(
        mut self,
        name: impl Into<String>,
        run: impl FnMut() -> CaseResult + 'static,
    ) -> Self {
        self.insert(name.into(), Box::new(run));
        self
    }

    /// Set the setup fixture.
    #[must_use]
    pub fn setup(self, run: impl FnMut() -> CaseResult + 'static) -> Self {
        self.case(SETUP, run)
    }

    /// Set the teardown fixture.
    #[must_use]
    pub fn teardown(self, run: impl FnMut() -> CaseResult + 'static) -> Self {
        self.case(TEARDOWN, run)
    }

    fn insert(&mut self, name: String, run: TestFn) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = run,
            None => self.entries.push((name, run)),
        }
    }

    /// Number of entries, fixtures included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_setup(&self) -> bool {
        self.entries.iter().any(|(name, _)| name == SETUP)
    }

    pub fn has_teardown(&self) -> bool {
        self.entries.iter().any(|(name, _)| name == TEARDOWN)
    }

    /// Case descriptions in run order, fixtures excluded.
    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| !is_fixture(name))
    }

    /// Split the entries into fixtures and ordered cases.
    pub fn into_plan(self) -> GroupPlan {
        let mut plan = GroupPlan {
            name: self.name,
            setup: None,
            teardown: None,
            cases: Vec::new(),
        };
        for (name, run) in self.entries {
            if name == SETUP {
                plan.setup = Some(run);
            } else if name == TEARDOWN {
                plan.teardown = Some(run);
            } else {
                plan.cases.push(TestCase {
                    description: name,
                    run,
                });
            }
        }
        plan
    }
}

impl fmt::Debug for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestGroup")
            .field("name", &self.name)
            .field(
                "entries",
                &self.entries.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn is_fixture(name: &str) -> bool {
    name == SETUP || name == TEARDOWN
}

/// A case ready to run.
pub struct TestCase {
    pub description: String,
    pub run: TestFn,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A group partitioned into fixtures and ordered cases.
pub struct GroupPlan {
    pub name: String,
    pub setup: Option<TestFn>,
    pub teardown: Option<TestFn>,
    pub cases: Vec<TestCase>,
}

/// An ordered collection of groups submitted to one run.
///
/// Adding a group whose name is already present replaces it in place.
#[derive(Debug, Default)]
pub struct TestSuite {
    groups: Vec<TestGroup>,
}

impl TestSuite {
    pub fn new() -> Self {
        TestSuite::default()
    }

    /// Builder form of [`TestSuite::add_group`].
    #[must_use]
    pub fn group(mut self, group: TestGroup) -> Self {
        self.add_group(group);
        self
    }

    pub fn add_group(&mut self, group: TestGroup) {
        match self.groups.iter_mut().find(|g| g.name == group.name) {
            Some(slot) => *slot = group,
            None => self.groups.push(group),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(TestGroup::name)
    }

    pub fn into_groups(self) -> Vec<TestGroup> {
        self.groups
    }
}

impl FromIterator<TestGroup> for TestSuite {
    fn from_iter<I: IntoIterator<Item = TestGroup>>(iter: I) -> Self {
        let mut suite = TestSuite::new();
        suite.extend(iter);
        suite
    }
}

impl Extend<TestGroup> for TestSuite {
    fn extend<I: IntoIterator<Item = TestGroup>>(&mut self, iter: I) {
        for group in iter {
            self.add_group(group);
        }
    }
}
