//! Автоматический выключатель (Circuit Breaker) для внешнего генеративного API.
//!
//! После серии сбоев подряд запросы к бэкенду временно не отправляются:
//! пользователь сразу получает fallback-ответ вместо ожидания таймаута.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use tokio::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Состояния "Автоматического выключателя".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// **Closed (Замкнуто)**: нормальный режим, запросы разрешены.
    Closed,
    /// **Open (Разомкнуто)**: запросы временно запрещены после множественных сбоев.
    Open,
    /// **HalfOpen (Полуоткрыто)**: после таймаута пропускаем пробный запрос.
    HalfOpen,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    /// Текущее состояние (Closed, Open, HalfOpen).
    state: RwLock<CircuitState>,
    /// Счетчик последовательных сбоев.
    failure_count: AtomicU32,
    /// Момент, когда цепь разомкнулась.
    opened_at: Mutex<Option<Instant>>,
    /// Порог сбоев, после которого выключатель переходит в состояние Open.
    failure_threshold: u32,
    /// Сколько держать цепь разомкнутой до перехода в HalfOpen.
    timeout_duration: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, timeout_seconds: u64) -> Self {
        Self {
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicU32::new(0),
            opened_at: Mutex::new(None),
            failure_threshold: failure_threshold.max(1),
            timeout_duration: Duration::from_secs(timeout_seconds),
        }
    }

    /// Проверяет, можно ли выполнить следующий запрос к сервису.
    pub fn can_execute(&self) -> bool {
        let state = *self.state.read().unwrap_or_else(PoisonError::into_inner);

        match state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let opened_at = *self.opened_at.lock().unwrap_or_else(PoisonError::into_inner);
                let timed_out = opened_at.map_or(true, |at| at.elapsed() >= self.timeout_duration);

                if timed_out {
                    *self.state.write().unwrap_or_else(PoisonError::into_inner) = CircuitState::HalfOpen;
                    info!("Circuit breaker transitioning to HalfOpen state");
                }
                timed_out
            }
        }
    }

    /// Регистрирует успешное выполнение запроса.
    pub fn record_success(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.failure_count.store(0, Ordering::Relaxed);

        if *state == CircuitState::HalfOpen {
            *state = CircuitState::Closed;
            info!("Circuit breaker recovered - transitioning to Closed state");
        }
    }

    /// Регистрирует неудачное выполнение запроса.
    pub fn record_failure(&self) {
        let failure_count = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        match *state {
            CircuitState::Closed if failure_count >= self.failure_threshold => {
                *state = CircuitState::Open;
                self.mark_opened();
                error!(
                    "Circuit breaker OPENED - {} failures reached threshold {}",
                    failure_count, self.failure_threshold
                );
            }
            // Пробный запрос провалился - снова размыкаем
            CircuitState::HalfOpen => {
                *state = CircuitState::Open;
                self.mark_opened();
                warn!("Circuit breaker test failed - returning to Open state");
            }
            _ => {}
        }
    }

    fn mark_opened(&self) {
        *self.opened_at.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
    }

    /// Текущее состояние и число сбоев подряд, для мониторинга.
    pub fn status(&self) -> (CircuitState, u32) {
        (
            *self.state.read().unwrap_or_else(PoisonError::into_inner),
            self.failure_count.load(Ordering::Relaxed),
        )
    }
}
