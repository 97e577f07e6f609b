/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http: request id / body limit / timeout / trace
 * - cors: ブラウザ向け CORS
 * - identity: x-user-id → OwnerId
 */
pub mod cors;
pub mod http;
pub mod identity;
