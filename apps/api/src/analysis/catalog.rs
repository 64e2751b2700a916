//! Static vocabularies used by the validator and the dimension scorers.
//!
//! The defaults are built once at startup and handed to the analyzer as
//! configuration. Tests and callers can swap in alternate catalogs through
//! [`Catalogs::new`].

use std::collections::{BTreeMap, HashSet};

/// Canonical resume sections, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Experience,
    Education,
    Skills,
    Summary,
    Projects,
    Contact,
    Achievements,
    Certifications,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Summary,
        Section::Projects,
        Section::Contact,
        Section::Achievements,
        Section::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Summary => "summary",
            Section::Projects => "projects",
            Section::Contact => "contact",
            Section::Achievements => "achievements",
            Section::Certifications => "certifications",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Default vocabularies
// ────────────────────────────────────────────────────────────────────────────

const SKILLS: &[&str] = &[
    // Technical
    "python", "java", "javascript", "c++", "c#", "ruby", "php", "sql", "r", "matlab",
    "go", "swift", "kotlin", "typescript", "html", "css", "react", "angular", "vue.js",
    "node.js", "django", "flask", "spring", "asp.net", "mysql", "postgresql", "mongodb",
    "redis", "oracle", "sqlite", "tensorflow", "pytorch", "scikit-learn", "pandas",
    "numpy", "hadoop", "spark", "big data", "aws", "azure", "gcp", "docker", "kubernetes",
    "jenkins", "git", "github", "gitlab", "devops", "linux", "windows server", "networking",
    "cybersecurity", "penetration testing", "cloud computing", "ansible", "terraform",
    "bash", "powershell", "power bi", "tableau", "excel", "machine learning",
    "data science", "data analysis", "etl", "sas", "spreadsheets",
    // CRM and sales
    "salesforce", "hubspot", "zoho", "crm", "sales operations", "lead generation",
    "sales strategy", "pipeline management",
    // Marketing and content
    "marketing", "digital marketing", "seo", "sem", "content marketing", "email marketing",
    "google ads", "facebook ads", "social media marketing", "social media management",
    "campaign management", "market research", "brand management", "copywriting",
    "content creation", "influencer marketing", "video editing", "adobe photoshop",
    "adobe illustrator", "adobe premiere", "canva",
    // Business, finance and operations
    "project management", "agile", "scrum", "kanban", "jira", "confluence",
    "microsoft project", "financial analysis", "budgeting", "forecasting", "accounting",
    "bookkeeping", "quickbooks", "sap", "oracle financials", "risk management", "compliance",
    "erp", "operations management", "process improvement", "six sigma", "lean",
    "business analysis", "strategy", "stakeholder management",
    // Human resources
    "hr", "recruitment", "talent acquisition", "onboarding", "training", "employee relations",
    "performance management", "payroll", "benefits administration", "workday",
    "people analytics",
    // Education
    "curriculum design", "instructional design", "lesson planning", "teaching", "e-learning",
    "blackboard", "moodle", "google classroom", "classroom management",
    // Logistics and supply chain
    "logistics", "supply chain", "inventory management", "warehouse management",
    "procurement", "shipping", "freight", "sap scm", "demand planning",
    // Healthcare
    "clinical research", "patient care", "nursing", "medical coding", "epic", "emr", "ehr",
    "pharmaceutical", "healthcare administration", "medical billing", "radiology",
    "telemedicine",
    // Legal
    "legal research", "contract management", "litigation", "paralegal", "document review",
    "corporate law", "intellectual property", "risk assessment",
    // Electronics and communication
    "embedded systems", "vlsi", "verilog", "systemverilog", "fpga", "rtl design",
    "pcb design", "altium designer", "proteus", "multisim", "cadence", "xilinx vivado",
    "keil", "arm cortex", "microcontrollers", "iot", "signal processing", "matlab simulink",
    "antennas", "wireless communication", "digital electronics", "analog electronics",
    "control systems", "labview", "oscilloscope", "soldering", "circuit design",
    "power electronics", "arduino", "raspberry pi", "uart", "spi", "i2c",
    // Manufacturing and industrial engineering
    "plc", "scada", "hmi", "automation", "siemens tia portal", "solidworks", "autocad",
    "catia", "ansys", "cnc programming", "lean manufacturing", "kaizen", "tpm",
    "5s methodology", "process optimization", "quality control", "industrial safety",
    "preventive maintenance", "inventory control", "production planning",
    "manufacturing operations", "mechatronics", "material handling", "factory operations",
    "root cause analysis", "statistical process control",
    // Soft skills
    "communication", "teamwork", "problem solving", "leadership", "time management",
    "adaptability", "creativity", "critical thinking", "collaboration", "empathy",
    "decision making", "conflict resolution", "negotiation", "active listening",
    "emotional intelligence", "persuasion", "strategic thinking", "resilience",
];

const SECTION_ALIASES: &[(Section, &[&str])] = &[
    (
        Section::Experience,
        &["experience", "work history", "employment", "professional experience", "career", "job history"],
    ),
    (
        Section::Education,
        &["education", "academic", "degree", "qualification", "studies", "training", "certifications"],
    ),
    (
        Section::Skills,
        &["skills", "expertise", "competencies", "abilities", "technical skills", "proficiencies"],
    ),
    (
        Section::Summary,
        &["summary", "profile", "objective", "overview", "about", "introduction"],
    ),
    (
        Section::Projects,
        &["projects", "portfolio", "works", "initiatives", "assignments"],
    ),
    (
        Section::Contact,
        &["contact", "email", "phone", "address", "connect", "reach me"],
    ),
    (
        Section::Achievements,
        &["achievements", "accomplishments", "awards", "honors", "recognitions", "extra-curricular"],
    ),
    (
        Section::Certifications,
        &["certifications", "credentials", "licenses", "certificates"],
    ),
];

const ACTION_VERBS: &[&str] = &[
    "led", "developed", "managed", "built", "implemented", "improved", "designed", "achieved",
    "optimized", "delivered", "created", "engineered", "orchestrated", "executed", "initiated",
    "formulated", "launched", "oversaw", "streamlined", "facilitated", "coordinated",
    "deployed", "administered", "enhanced", "constructed", "restructured", "directed",
    "negotiated", "proposed", "analyzed", "researched", "evaluated", "innovated", "drafted",
    "authored", "upgraded", "revised", "automated", "accelerated", "mentored", "mobilized",
    "championed", "consolidated", "influenced", "secured", "integrated", "refined",
    "monitored", "budgeted",
];

const ACHIEVEMENT_VERBS: &[&str] = &[
    "increased", "reduced", "saved", "generated", "improved", "achieved", "boosted", "cut",
    "raised", "gained", "doubled", "tripled", "enhanced", "delivered", "maximized",
    "minimized", "optimized", "automated", "accelerated", "decreased", "participated", "won",
    "completed", "currently", "finalized", "secured", "attained", "earned", "awarded",
];

const QUANTIFIER_UNITS: &[&str] = &[
    "users", "clients", "projects", "customers", "teams", "sales", "leads", "deals", "profit",
    "ROI", "revenue",
];

// ────────────────────────────────────────────────────────────────────────────
// Catalogs
// ────────────────────────────────────────────────────────────────────────────

/// Immutable vocabularies shared by every analysis. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalogs {
    skills: HashSet<String>,
    sections: BTreeMap<Section, Vec<String>>,
    action_verbs: HashSet<String>,
    achievement_verbs: Vec<String>,
    quantifier_units: Vec<String>,
}

impl Catalogs {
    /// Builds a catalog from caller-supplied vocabularies. Skill, alias and verb
    /// entries are lowercased; quantifier units keep their case because the
    /// achievement pattern is matched case-insensitively anyway.
    pub fn new<S: AsRef<str>>(
        skills: &[S],
        sections: &[(Section, &[&str])],
        action_verbs: &[S],
        achievement_verbs: &[S],
        quantifier_units: &[S],
    ) -> Self {
        let lower = |v: &[S]| -> Vec<String> {
            v.iter().map(|s| s.as_ref().trim().to_lowercase()).collect()
        };

        let mut section_map: BTreeMap<Section, Vec<String>> = BTreeMap::new();
        for (section, aliases) in sections {
            section_map
                .entry(*section)
                .or_default()
                .extend(aliases.iter().map(|a| a.to_lowercase()));
        }

        let mut achievement_verbs = lower(achievement_verbs);
        achievement_verbs.dedup();

        Self {
            skills: lower(skills).into_iter().collect(),
            sections: section_map,
            action_verbs: lower(action_verbs).into_iter().collect(),
            achievement_verbs,
            quantifier_units: quantifier_units
                .iter()
                .map(|s| s.as_ref().trim().to_string())
                .collect(),
        }
    }

    pub fn skills(&self) -> &HashSet<String> {
        &self.skills
    }

    pub fn is_skill(&self, token_lower: &str) -> bool {
        self.skills.contains(token_lower)
    }

    pub fn sections(&self) -> impl Iterator<Item = (Section, &[String])> {
        self.sections.iter().map(|(s, a)| (*s, a.as_slice()))
    }

    pub fn aliases(&self, section: Section) -> &[String] {
        self.sections
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn action_verbs(&self) -> &HashSet<String> {
        &self.action_verbs
    }

    pub fn achievement_verbs(&self) -> &[String] {
        &self.achievement_verbs
    }

    pub fn quantifier_units(&self) -> &[String] {
        &self.quantifier_units
    }

    /// Every section alias and skill phrase, used by the resume-shape gate.
    pub fn resume_keywords(&self) -> impl Iterator<Item = &str> {
        self.sections
            .values()
            .flatten()
            .chain(self.skills.iter())
            .map(String::as_str)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::new(
            SKILLS,
            SECTION_ALIASES,
            ACTION_VERBS,
            ACHIEVEMENT_VERBS,
            QUANTIFIER_UNITS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_sizes() {
        let c = Catalogs::default();
        assert!(c.skills().len() >= 250, "only {} skills", c.skills().len());
        assert_eq!(c.sections().count(), 8);
        assert!(c.action_verbs().len() >= 48);
        assert!(c.achievement_verbs().len() >= 25);
    }

    #[test]
    fn test_every_section_has_aliases() {
        let c = Catalogs::default();
        for section in Section::ALL {
            assert!(!c.aliases(section).is_empty(), "{} has no aliases", section.as_str());
        }
    }

    #[test]
    fn test_skills_are_lowercase_lookup() {
        let c = Catalogs::default();
        assert!(c.is_skill("python"));
        assert!(c.is_skill("node.js"));
        assert!(c.is_skill("c++"));
        assert!(!c.is_skill("Python"));
    }

    #[test]
    fn test_custom_catalog_lowercases_entries() {
        let c = Catalogs::new(
            &["Rust", "Tokio"],
            &[(Section::Skills, &["Stack"])],
            &["Shipped"],
            &["Grew"],
            &["users"],
        );
        assert!(c.is_skill("rust"));
        assert_eq!(c.aliases(Section::Skills), ["stack".to_string()]);
        assert!(c.aliases(Section::Education).is_empty());
        assert!(c.action_verbs().contains("shipped"));
        assert_eq!(c.achievement_verbs(), ["grew".to_string()]);
    }

    #[test]
    fn test_resume_keywords_include_aliases_and_skills() {
        let c = Catalogs::default();
        let all: HashSet<&str> = c.resume_keywords().collect();
        assert!(all.contains("work history"));
        assert!(all.contains("kubernetes"));
    }
}
