use chrono::NaiveDate;
use duedag::config::{ConfigSection, PlanFile, RawPlanFile, TaskConfig};
use duedag::dag::TaskDescriptor;
use duedag::types::{MissingDependencies, Strategy, TaskPriority, TaskStatus};

/// Builder for `PlanFile` to simplify test setup.
pub struct PlanFileBuilder {
    plan: RawPlanFile,
}

impl PlanFileBuilder {
    pub fn new() -> Self {
        Self {
            plan: RawPlanFile {
                config: ConfigSection::default(),
                tasks: Vec::new(),
            },
        }
    }

    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.plan.tasks.push(task);
        self
    }

    pub fn hours_per_day(mut self, hours: f64) -> Self {
        self.plan.config.hours_per_day = hours;
        self
    }

    pub fn max_rounds(mut self, rounds: usize) -> Self {
        self.plan.config.max_rounds = rounds;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.plan.config.strategy = strategy;
        self
    }

    pub fn missing_dependencies(mut self, policy: MissingDependencies) -> Self {
        self.plan.config.missing_dependencies = policy;
        self
    }

    pub fn build(self) -> PlanFile {
        PlanFile::try_from(self.plan).expect("Failed to build valid plan from builder")
    }
}

impl Default for PlanFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            task: TaskConfig {
                id: id.to_string(),
                title: None,
                effort_hours: None,
                after: vec![],
                due: None,
                status: None,
                priority: None,
                assignee: None,
                tags: vec![],
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.task.title = Some(title.to_string());
        self
    }

    pub fn effort(mut self, hours: f64) -> Self {
        self.task.effort_hours = Some(hours);
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.task.due = Some(date);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.task.priority = Some(priority);
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.task.tags.push(tag.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

/// Shorthand for a descriptor with an effort estimate and dependencies.
pub fn task(id: &str, effort_hours: f64, deps: &[&str]) -> TaskDescriptor {
    deps.iter().fold(
        TaskDescriptor::new(id).with_effort(effort_hours),
        |t, dep| t.depends_on(*dep),
    )
}
