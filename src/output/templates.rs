//! Pre-authored phrasing pools for generated explanations and advice.
//!
//! Placeholders are substituted by [`render`]: `{score}`, `{skill_match}`,
//! `{experience}`, `{matching}`, `{missing}`, `{skills}`, `{from}`, `{to}`.

use crate::processing::taxonomy::SkillCategory;

/// Score bucket shared by explanations, assessments and recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBucket {
    Excellent,
    Strong,
    Moderate,
    Developing,
}

impl ScoreBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            ScoreBucket::Excellent
        } else if score >= 70.0 {
            ScoreBucket::Strong
        } else if score >= 50.0 {
            ScoreBucket::Moderate
        } else {
            ScoreBucket::Developing
        }
    }
}

/// Coarser tier used only for improvement suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionTier {
    High,
    Medium,
    Low,
}

impl SuggestionTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            SuggestionTier::High
        } else if score >= 50.0 {
            SuggestionTier::Medium
        } else {
            SuggestionTier::Low
        }
    }
}

/// Substitute `{name}` placeholders
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}

pub fn explanations(bucket: ScoreBucket) -> &'static [&'static str] {
    match bucket {
        ScoreBucket::Excellent => &[
            "🧠 **Insight**: Outstanding alignment. A {score}% capability score shows exceptional compatibility with this role, backed by {skill_match}% skill coverage and {experience}% experience fit.",
            "🚀 **Assessment**: Top candidate profile. At {score}% overall, your {matching} matching skills form a strong base for immediate impact.",
            "💎 **Analysis**: Exceptional match at {score}%. {skill_match}% technical alignment and {experience}% experience compatibility put you among the strongest applicants.",
            "⭐ **Evaluation**: Premier fit with a {score}% capability score. Skill coverage and experience progression both point to outstanding readiness.",
        ],
        ScoreBucket::Strong => &[
            "📊 **Insight**: Strong candidate profile at {score}% overall capability. {skill_match}% skill alignment and {experience}% experience fit give you a competitive edge.",
            "👍 **Assessment**: Well qualified at {score}%. You bring {matching} relevant skills and a good experience match for this position.",
            "💪 **Analysis**: Solid foundation at {score}%. Closing {missing} remaining gaps would move you into the top tier.",
            "📈 **Evaluation**: Promising {score}% alignment. A {skill_match}% technical match is a strong platform for success in this role.",
        ],
        ScoreBucket::Moderate => &[
            "💡 **Insight**: Moderate fit at {score}%. You already have {matching} relevant skills; working on {missing} missing competencies would raise your readiness considerably.",
            "🔄 **Assessment**: Developing candidate at {score}% alignment. {skill_match}% technical match and {experience}% experience fit are a workable base for growth.",
            "🎯 **Analysis**: Foundational match at {score}%. The core qualifications are there, with room to grow in specific technical areas.",
            "🔍 **Evaluation**: A {score}% score reflects a profile in progress. Targeted skill development can change your candidacy for this role.",
        ],
        ScoreBucket::Developing => &[
            "🌱 **Insight**: Emerging candidate at {score}%. There is room for focused development in technical skills ({skill_match}% current match) and in hands-on experience.",
            "📚 **Assessment**: Development-focused profile at {score}% alignment. Treat this role as a growth target while you build the {missing} missing competencies.",
            "🎓 **Analysis**: Early readiness at {score}%. Entry-level positions are a good way to grow beyond your current {matching} matching skills.",
            "🛠️ **Evaluation**: Building phase at {score}%. This assessment lays out a clear path toward the qualifications the role needs.",
        ],
    }
}

/// Level label, description, color tag and icon
pub type AssessmentTemplate = (&'static str, &'static str, &'static str, &'static str);

pub fn assessments(bucket: ScoreBucket) -> &'static [AssessmentTemplate] {
    match bucket {
        ScoreBucket::Excellent => &[
            ("Elite Candidate", "Your profile shows exceptional qualifications, broad skill coverage and ideal experience alignment for this role.", "green", "🏆"),
            ("Top-Tier Ready", "You combine strong technical proficiency with an excellent experience fit, ready for immediate impact.", "green", "⭐"),
            ("Premium Match", "Alignment across every dimension makes you a highly desirable candidate for this position.", "green", "💎"),
        ],
        ScoreBucket::Strong => &[
            ("Highly Competitive", "You show strong qualifications with good technical alignment and a solid experience foundation.", "blue", "🚀"),
            ("Well-Positioned", "Your profile covers much of what the role needs, with promising alignment to its requirements.", "blue", "👍"),
            ("Qualified Candidate", "You have the core competencies for this role and a good overall fit.", "blue", "💪"),
        ],
        ScoreBucket::Moderate => &[
            ("Developing Professional", "You have relevant foundational skills and clear paths toward full compatibility with the role.", "orange", "📈"),
            ("Growth Candidate", "Your qualifications are a solid base, with identified areas for strategic skill building.", "orange", "🎯"),
            ("Emerging Potential", "You show promising capabilities, with specific development opportunities to improve your fit.", "orange", "🔍"),
        ],
        ScoreBucket::Developing => &[
            ("Foundation Builder", "There is a clear development path toward the qualifications this career direction needs.", "red", "🌱"),
            ("Skill Developer", "Your profile is in a building phase, with focused work needed on core competencies.", "red", "🛠️"),
            ("Career Explorer", "Treat this role as a growth target while you develop the skills and experience it asks for.", "red", "🎓"),
        ],
    }
}

pub fn recommendations(bucket: ScoreBucket) -> &'static [&'static str] {
    match bucket {
        ScoreBucket::Excellent => &[
            "**Strategic Next Steps**: Use your strong qualifications in negotiations and aim for senior-level responsibilities. Show leadership potential and architectural thinking.",
            "**Career Advancement**: Build on your alignment by positioning yourself for leadership opportunities. Put your full skill set forward in strategic discussions.",
            "**Professional Growth**: Look for mentoring roles and complex project leadership. A specialization area would maximize your impact.",
        ],
        ScoreBucket::Strong => &[
            "**Development Focus**: Sharpen your competitive edge by mastering one or two advanced skills, and show that expertise to advance quickly.",
            "**Career Strategy**: Extend your foundation with targeted certifications or advanced projects, and document measurable achievements.",
            "**Skill Enhancement**: Refine existing strengths while closing the minor gaps. Cross-functional projects show versatility.",
        ],
        ScoreBucket::Moderate => &[
            "**Learning Path**: Make a structured plan for the missing core competencies and back it with practical projects.",
            "**Career Development**: Target roles that bridge your current capabilities and your goals, and build a portfolio along the way.",
            "**Skill Building**: Prioritize foundational competencies through courses and hands-on practice, taking on responsibility gradually.",
        ],
        ScoreBucket::Developing => &[
            "**Foundation Strategy**: Start with fundamental courses and entry-level positions to build a strong technical base.",
            "**Career Planning**: Lay out a step-by-step plan from your current skills to the target role and track each milestone.",
            "**Learning Journey**: Begin with the essential skills through structured learning, and gain practice through personal projects and internships.",
        ],
    }
}

pub const HIGH_SKILL_STRENGTHS: &[&str] = &[
    "Exceptional technical proficiency across multiple domains",
    "Strong competency alignment with role requirements",
    "Comprehensive skill coverage in key technical areas",
    "Robust technical foundation for immediate contribution",
];

pub const HIGH_EXPERIENCE_STRENGTHS: &[&str] = &[
    "Ideal experience level for the position",
    "Excellent career progression alignment",
    "Strong professional background match",
    "Relevant experience depth for success in the role",
];

pub const BROAD_SKILL_STRENGTHS: &[&str] = &[
    "Diverse skill set across multiple categories",
    "Broad technical competency coverage",
    "Versatile capabilities across different domains",
    "Comprehensive skill portfolio",
];

pub const LEVEL_MATCH_STRENGTHS: &[&str] = &[
    "Experience level matches the role exactly",
    "Ideal career stage alignment",
    "Optimal seniority match",
    "Excellent seniority fit",
];

pub const STRENGTHS_FALLBACK: &str = "Focus on building your core competency areas";

pub const SKILL_GAP_WEAKNESSES: &[&str] = &[
    "Technical skills gap requiring development",
    "Need for stronger technical competency",
    "Skill development opportunities identified",
    "Technical proficiency needs strengthening",
];

pub const EXPERIENCE_GAP_WEAKNESSES: &[&str] = &[
    "Experience level misalignment",
    "Career stage development opportunity",
    "Professional experience gap",
    "Career progression adjustment needed",
];

pub const MULTIPLE_GAP_WEAKNESSES: &[&str] = &[
    "Multiple competency areas to develop",
    "Several skill enhancement opportunities",
    "Various technical domains needing attention",
    "Multiple development focus areas",
];

pub const WEAKNESSES_FALLBACK: &str = "Well-balanced profile with minimal development needs";

pub fn capability_suggestions(tier: SuggestionTier) -> &'static [&'static str] {
    match tier {
        SuggestionTier::High => &[
            "🎯 **Interview Preparation**: Refine your interview stories with specific achievement examples",
            "🚀 **Advanced Positioning**: Show leadership potential when discussing complex projects",
            "💎 **Strategic Impact**: Bring architectural thinking into technical conversations",
            "⭐ **Expert Presence**: Write up case studies of your most significant contributions",
        ],
        SuggestionTier::Medium => &[
            "📈 **Competitive Enhancement**: Pick 2-3 high-value skills for the quickest improvement",
            "💪 **Strength Amplification**: Deepen expertise in your strongest technical areas",
            "🔧 **Gap Closure**: Apply the missing competencies in practical projects",
            "🎯 **Strategic Development**: Align your learning with emerging industry trends",
        ],
        SuggestionTier::Low => &[
            "🔄 **Foundation Building**: Establish core competencies through structured learning paths",
            "🌱 **Progressive Development**: Acquire and apply skills incrementally",
            "📚 **Fundamental Mastery**: Prioritize essential skills before moving to complex topics",
            "🛠️ **Practical Learning**: Pair theory with hands-on project experience",
        ],
    }
}

/// Categories that get a dedicated suggestion when skills are missing, in order
pub const PRIORITY_CATEGORIES: [SkillCategory; 3] = [
    SkillCategory::CoreTechnical,
    SkillCategory::CloudDevops,
    SkillCategory::Frameworks,
];

pub fn category_suggestions(category: SkillCategory) -> &'static [&'static str] {
    match category {
        SkillCategory::CoreTechnical => &[
            "🔧 **Core Technical**: Build proficiency in {skills} through coding practice and projects",
            "💻 **Programming Skills**: Master {skills} with hands-on challenges and real-world applications",
            "⚡ **Technical Foundation**: Develop solid {skills} capabilities through systematic learning",
        ],
        SkillCategory::CloudDevops => &[
            "☁️ **Cloud & DevOps**: Learn {skills} through certification paths and infrastructure projects",
            "🔄 **Infrastructure Skills**: Practice {skills} with containerization and automation exercises",
            "⚙️ **Platform Mastery**: Gain {skills} experience by experimenting on a cloud platform",
        ],
        SkillCategory::Frameworks => &[
            "🛠️ **Framework Proficiency**: Gain {skills} experience through framework-specific projects",
            "🔨 **Tool Mastery**: Develop {skills} skills with practical implementation exercises",
            "🎯 **Technology Stack**: Build {skills} expertise through stack-focused development",
        ],
        _ => &[],
    }
}

pub const EXPERIENCE_SUGGESTIONS: &[&str] = &[
    "⏳ **Career Progression**: Seek roles that bridge {from} to {to} level responsibilities",
    "📊 **Experience Building**: Take on projects that demonstrate {to} level capabilities",
    "🎯 **Professional Growth**: Pursue opportunities that develop {to} level competencies",
];

pub const LEARNING_SUGGESTIONS: &[&str] = &[
    "💼 **Portfolio Development**: Create demonstration projects for your target role",
    "📚 **Continuous Learning**: Follow industry leaders and take part in technical communities",
    "🎓 **Skill Validation**: Consider certifications that validate your expertise",
    "🤝 **Professional Networking**: Engage with communities in your target technology domains",
];
