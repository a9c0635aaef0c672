use rand::Rng;

/// An environment in which an agent can act
///
/// This base trait covers both stateless environments (bandits) and episodic ones; the latter
/// additionally implement [`Episodic`].
pub trait Environment {
    /// A representation of an action that an agent can take to affect the environment
    type Action: Copy;

    /// Get the available actions for the current step
    ///
    /// The returned vector should never be empty, instead specify an action that represents doing nothing if necessary.
    fn actions(&self) -> Vec<Self::Action>;

    /// Apply an action and advance the environment by one tick
    ///
    /// **Returns** `(reward, terminal)`
    fn step<R: Rng + ?Sized>(&mut self, action: Self::Action, rng: &mut R) -> (f64, bool);
}

/// An environment with an observable state that runs in episodes
pub trait Episodic: Environment {
    /// A representation of the state of the environment to be passed to an agent
    type Observation;

    /// Reset the environment to the start of a fresh episode
    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// Render the current state without mutating it
    fn observe(&self) -> Self::Observation;
}

/// Represents a single transition in an [`Episodic`] environment
pub struct Exp<E: Episodic> {
    /// The observation before taking the action
    pub observation: E::Observation,
    /// The action taken
    pub action: E::Action,
    /// The observation after the action is taken
    pub next_observation: E::Observation,
    /// The reward received after taking the action
    pub reward: f64,
}

impl<E: Episodic> Clone for Exp<E>
where
    E::Observation: Clone,
{
    fn clone(&self) -> Self {
        Self {
            observation: self.observation.clone(),
            action: self.action,
            next_observation: self.next_observation.clone(),
            reward: self.reward,
        }
    }
}
