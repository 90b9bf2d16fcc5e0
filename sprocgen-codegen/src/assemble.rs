//! Class assembly: bucketing method pairs into the generated class tree.

use indexmap::IndexMap;
use sprocgen_options::GlobalOptions;

use crate::{
    ast::{Class, Member, Method, Namespace},
    resolve::Destination,
    support::support_members,
};

/// Namespaces imported at the top of the generated file.
const IMPORTS: &[&str] = &[
    "System",
    "System.Collections",
    "System.Data",
    "System.Data.SqlClient",
    "System.Data.SqlTypes",
];

/// Accumulates synthesized method pairs into the root class and its nested
/// per-mapping classes.
///
/// Nested classes are keyed by destination name in insertion order, so the
/// generated tree is identical across runs over the same catalog. The
/// support battery is installed once, up front, regardless of how many
/// procedures use it.
pub struct ClassAssembler {
    root: Class,
    buckets: IndexMap<String, Vec<Member>>,
}

impl ClassAssembler {
    pub fn new(options: &GlobalOptions) -> Self {
        let mut root = Class::new(&options.class_name).with_private_ctor();
        root.members.extend(support_members(options));
        Self {
            root,
            buckets: IndexMap::new(),
        }
    }

    /// Place one plain/transacted pair at its destination. The first
    /// procedure routed to a class name creates the bucket; later ones
    /// append to it.
    pub fn add(&mut self, destination: &Destination, plain: Method, transacted: Method) {
        match destination {
            Destination::Root { .. } => {
                self.root.members.push(Member::Method(plain));
                self.root.members.push(Member::Method(transacted));
            }
            Destination::Class { class, .. } => {
                let bucket = self.buckets.entry(class.clone()).or_default();
                bucket.push(Member::Method(plain));
                bucket.push(Member::Method(transacted));
            }
        }
    }

    /// Close the tree: nest the buckets inside the root class, in the order
    /// they were first seen.
    pub fn finish(mut self, namespace: impl Into<String>) -> Namespace {
        for (name, members) in self.buckets {
            let mut class = Class::new(name);
            class.members = members;
            self.root.members.push(Member::Class(class));
        }
        Namespace {
            name: namespace.into(),
            imports: IMPORTS.iter().map(|s| s.to_string()).collect(),
            classes: vec![self.root],
        }
    }
}
