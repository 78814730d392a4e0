// ==========================================
// 车间排产引擎 - 交期排序与合批
// ==========================================
// 职责: 按交期升序稳定排序,再将同名工序按交期邻近窗口合批
// 输入: 抽取后的 PlanTask 列表
// 输出: 批次列表 (批次顺序 = 排产顺序)
// ==========================================
// 合批规则:
// 1) 按 due_date 升序稳定排序 (平局保持抽取顺序)
// 2) 顺序遍历,遇到未入批任务即作为批次锚点
// 3) 只从锚点之后的未入批任务中选取成员:
//    归一化工序名相同 且 |due_date - 锚点 due_date| <= window_days
// 4) 成员保持排序列表中的相对顺序
// ==========================================
// 红线: 合批不得把锚点排到更紧急的未合批任务之后
// ==========================================

use crate::engine::task_extractor::PlanTask;
use tracing::debug;

// ==========================================
// Batch - 合批批次
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub anchor: PlanTask,
    pub members: Vec<PlanTask>, // 紧随锚点连续排产的同名工序
}

impl Batch {
    pub fn len(&self) -> usize {
        1 + self.members.len()
    }

    /// 批内全部任务（锚点在前）
    pub fn tasks(&self) -> impl Iterator<Item = &PlanTask> {
        std::iter::once(&self.anchor).chain(self.members.iter())
    }
}

// ==========================================
// TaskBatcher - 排序与合批
// ==========================================
pub struct TaskBatcher {
    window_days: i64,
}

impl TaskBatcher {
    /// # 参数
    /// - `window_days`: 合批交期邻近窗口（天）
    pub fn new(window_days: i64) -> Self {
        Self {
            window_days: window_days.max(0),
        }
    }

    /// 按交期升序稳定排序
    pub fn sort_by_due(&self, mut tasks: Vec<PlanTask>) -> Vec<PlanTask> {
        tasks.sort_by_key(|t| t.due_date);
        tasks
    }

    /// 排序并合批
    pub fn build_batches(&self, tasks: Vec<PlanTask>) -> Vec<Batch> {
        let mut pending: Vec<Option<PlanTask>> = self.sort_by_due(tasks).into_iter().map(Some).collect();
        let mut batches = Vec::new();

        for i in 0..pending.len() {
            let anchor = match pending[i].take() {
                Some(task) => task,
                None => continue, // 已被前面的批次吸收
            };

            let mut members = Vec::new();
            for slot in pending.iter_mut().skip(i + 1) {
                let matches = slot
                    .as_ref()
                    .map(|candidate| self.is_batchable(&anchor, candidate))
                    .unwrap_or(false);
                if matches {
                    if let Some(member) = slot.take() {
                        members.push(member);
                    }
                }
            }

            if !members.is_empty() {
                debug!(
                    batch_key = %anchor.batch_key,
                    anchor_job = %anchor.process_ref.job_id,
                    member_count = members.len(),
                    "形成合批"
                );
            }

            batches.push(Batch { anchor, members });
        }

        batches
    }

    /// 判断候选任务能否并入锚点批次
    fn is_batchable(&self, anchor: &PlanTask, candidate: &PlanTask) -> bool {
        candidate.batch_key == anchor.batch_key
            && (candidate.due_date - anchor.due_date).num_days().abs() <= self.window_days
    }
}

impl Default for TaskBatcher {
    fn default() -> Self {
        Self::new(2)
    }
}
