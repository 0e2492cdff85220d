//! Built-in sample job postings

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleJob {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SAMPLE_JOBS: &[SampleJob] = &[
    SampleJob {
        title: "Senior Python Developer",
        description: "We are hiring a Senior Python Developer with 5+ years of experience.\n\
            Required:\n\
            - Python and Django or Flask\n\
            - REST API design and SQL database modelling\n\
            - AWS or Azure, Docker and CI/CD pipelines\n\
            - Agile delivery\n\
            Nice to have:\n\
            - Machine learning exposure\n\
            - Microservices and Kubernetes",
    },
    SampleJob {
        title: "Data Scientist",
        description: "Data Scientist\n\
            Requirements:\n\
            - Python for data analysis\n\
            - SQL and relational databases\n\
            - Machine learning algorithms and statistics\n\
            - Data visualisation and storytelling\n\
            Nice to have:\n\
            - R\n\
            - Spark or other big data tooling\n\
            - Cloud computing",
    },
    SampleJob {
        title: "Full Stack Developer",
        description: "Full Stack Developer\n\
            Required:\n\
            - JavaScript with React, Angular or Vue\n\
            - Node.js and Express, or a Python backend\n\
            - HTML, CSS and responsive layouts\n\
            - REST API development\n\
            - PostgreSQL or MongoDB\n\
            - Git and Agile teamwork",
    },
    SampleJob {
        title: "Machine Learning Engineer",
        description: "Machine Learning Engineer\n\
            Requirements:\n\
            - Strong Python\n\
            - TensorFlow or PyTorch\n\
            - Feature engineering and model deployment\n\
            - SQL\n\
            Preferred:\n\
            - Deep learning\n\
            - AWS or GCP machine learning services\n\
            - Docker and Kubernetes",
    },
    SampleJob {
        title: "DevOps Engineer",
        description: "DevOps Engineer\n\
            You will:\n\
            - Own CI/CD pipelines in Jenkins\n\
            - Manage infrastructure as code with Terraform\n\
            - Run Docker and Kubernetes workloads on AWS, Azure or GCP\n\
            - Collaborate with developers on reliable delivery\n\
            Skills:\n\
            - Linux administration and scripting in Python\n\
            - Git",
    },
    SampleJob {
        title: "Junior Frontend Developer",
        description: "Junior Frontend Developer (entry level, graduates welcome)\n\
            Requirements:\n\
            - JavaScript fundamentals\n\
            - React or Vue\n\
            - Git\n\
            - Good communication and teamwork\n\
            Nice to have:\n\
            - Experience calling a REST API",
    },
];

/// Find a sample posting by title, ignoring case and surrounding whitespace
pub fn find(title: &str) -> Option<&'static SampleJob> {
    let wanted = title.trim();
    SAMPLE_JOBS.iter().find(|job| job.title.eq_ignore_ascii_case(wanted))
}

pub fn titles() -> impl Iterator<Item = &'static str> {
    SAMPLE_JOBS.iter().map(|job| job.title)
}
