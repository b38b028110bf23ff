use serde::{Deserialize, Serialize};

/// The defect taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// Geometry outside the flat layered stock model.
    NonUniform,
    /// A cylinder or cone whose axis is off the layering axis.
    Radius,
    /// A cone-to-cylinder countersunk hole.
    CounterSink,
    /// A stepped counterbored hole.
    CounterBore,
    /// A hole narrower than the kerf.
    SmallHole,
    /// A gap or slot narrower than the kerf.
    SmallCut,
    /// A slanted face spanning the full thickness.
    Draft,
    /// A slanted face spanning part of the thickness.
    Chamfer,
    /// An internal corner sharper than the cut can follow.
    TightCorner,
    /// A shallow internal corner.
    TightCornerMild,
}

/// One reported defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    /// Indices of the implicated faces in shape order, or `None` for
    /// shape-wide defects.
    pub faces: Option<Vec<usize>>,
}

impl Issue {
    /// A shape-wide issue.
    #[must_use]
    pub fn global(kind: IssueKind) -> Self {
        Self { kind, faces: None }
    }

    /// An issue naming specific faces.
    #[must_use]
    pub fn on_faces(kind: IssueKind, faces: Vec<usize>) -> Self {
        Self {
            kind,
            faces: Some(faces),
        }
    }
}

/// The ordered result of a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub issues: Vec<Issue>,
}

impl Report {
    /// Returns `true` if the shape has no issues.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues of `kind`.
    #[must_use]
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    /// Returns `true` if any issue is of `kind`.
    #[must_use]
    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    /// Issue kinds in report order.
    #[must_use]
    pub fn kinds(&self) -> Vec<IssueKind> {
        self.issues.iter().map(|i| i.kind).collect()
    }

    /// Serializes the report as `{"issues": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
